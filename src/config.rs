//! Configuration types for jobfetch

use crate::error::{Error, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Path appended to the base URL for each request; `{id}` is replaced by the request index
pub const DEFAULT_ENDPOINT_PATH: &str = "/getjobdetails/{id}";

/// Placeholder substituted with the request index
pub const INDEX_PLACEHOLDER: &str = "{id}";

/// Main configuration for [`JobFetcher`](crate::JobFetcher)
///
/// Constructed once at startup and passed by value into the fetcher. Call
/// [`Config::validate`] (done by `JobFetcher::new`) before issuing requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the job service (required), e.g. `http://localhost:8080`
    pub base_url: String,

    /// Per-request deadline covering send and body read (default: 30 seconds)
    #[serde(
        default = "default_timeout",
        rename = "timeout_seconds",
        with = "duration_serde"
    )]
    pub timeout: Duration,

    /// Maximum number of requests in flight at once (default: 30)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Number of requests in a batch (default: 1)
    #[serde(default = "default_request_count")]
    pub request_count: u32,

    /// Request path template relative to `base_url` (default: `/getjobdetails/{id}`)
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,
}

impl Config {
    /// Config for `base_url` with every other setting at its default
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: default_timeout(),
            concurrency: default_concurrency(),
            request_count: default_request_count(),
            endpoint_path: default_endpoint_path(),
        }
    }

    /// Reject settings that would make a batch impossible to run.
    ///
    /// Called before any request is made, so a bad value never produces
    /// partial network activity.
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(Error::config("base_url", "base URL must not be empty"));
        }
        let parsed = url::Url::parse(base).map_err(|e| {
            Error::config("base_url", format!("invalid base URL '{}': {}", base, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(
                "base_url",
                format!("unsupported URL scheme '{}'", parsed.scheme()),
            ));
        }

        if self.concurrency == 0 {
            return Err(Error::config("concurrency", "concurrency must be at least 1"));
        }

        if self.timeout.is_zero() {
            return Err(Error::config(
                "timeout_seconds",
                "timeout must be greater than zero",
            ));
        }

        if !self.endpoint_path.starts_with('/') {
            return Err(Error::config(
                "endpoint_path",
                format!("endpoint path '{}' must start with '/'", self.endpoint_path),
            ));
        }
        if self.endpoint_path.matches(INDEX_PLACEHOLDER).count() != 1 {
            return Err(Error::config(
                "endpoint_path",
                format!(
                    "endpoint path '{}' must contain exactly one {} placeholder",
                    self.endpoint_path, INDEX_PLACEHOLDER
                ),
            ));
        }

        Ok(())
    }
}

/// Command line surface of the `jobfetch` binary.
///
/// Every option can also be supplied through the environment, including a
/// `.env` file in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "jobfetch",
    version,
    about = "Fetch job IDs from a job service with bounded concurrency"
)]
pub struct CliArgs {
    /// Base URL of the job service, e.g. `http://localhost:8080`
    ///
    /// Environment variable: `JOBFETCH_URL`
    #[arg(long, env = "JOBFETCH_URL")]
    pub url: String,

    /// Seconds to wait for each response before giving up on it
    ///
    /// Environment variable: `JOBFETCH_TIMEOUT_SECONDS`
    #[arg(long, env = "JOBFETCH_TIMEOUT_SECONDS", default_value_t = 30)]
    pub timeout_seconds: u64,

    /// Maximum number of requests in flight at once
    ///
    /// Environment variable: `JOBFETCH_CONCURRENCY`
    #[arg(long, env = "JOBFETCH_CONCURRENCY", default_value_t = 30)]
    pub concurrency: usize,

    /// Number of requests to issue
    ///
    /// Environment variable: `JOBFETCH_REQUEST_COUNT`
    #[arg(long, env = "JOBFETCH_REQUEST_COUNT", default_value_t = 1)]
    pub request_count: u32,
}

impl TryFrom<CliArgs> for Config {
    type Error = Error;

    fn try_from(args: CliArgs) -> Result<Self> {
        let config = Config {
            base_url: args.url,
            timeout: Duration::from_secs(args.timeout_seconds),
            concurrency: args.concurrency,
            request_count: args.request_count,
            endpoint_path: default_endpoint_path(),
        };
        config.validate()?;
        Ok(config)
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_concurrency() -> usize {
    30
}

fn default_request_count() -> u32 {
    1
}

fn default_endpoint_path() -> String {
    DEFAULT_ENDPOINT_PATH.to_string()
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
