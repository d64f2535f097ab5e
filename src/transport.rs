//! HTTP transport for the job details endpoint.
//!
//! [`JobTransport`] is the seam between the fan-out engine and the network:
//! one GET per request index, returning the raw body or a classified error.
//! [`HttpTransport`] is the production implementation on top of a shared
//! `reqwest::Client` connection pool.

use crate::config::{Config, INDEX_PLACEHOLDER};
use crate::error::{RequestError, Result};
use crate::types::RequestIndex;
use std::time::Duration;

/// Raw response of a successful GET
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    /// Response body bytes
    pub body: Vec<u8>,
    /// Value of the `Content-Type` header, if any
    pub content_type: Option<String>,
}

impl RawResponse {
    /// Response with a JSON content type
    pub fn json(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            content_type: Some("application/json".to_string()),
        }
    }
}

/// Abstraction over fetching job details, enabling testability.
///
/// Implementations must be safe to call concurrently; the fan-out engine
/// shares one transport across every in-flight request.
#[async_trait::async_trait]
pub trait JobTransport: Send + Sync {
    /// Issue one GET for `index` and read the full body.
    ///
    /// Timeouts are enforced by the caller; implementations may additionally
    /// report their own as [`RequestError::Timeout`].
    async fn get_job_details(
        &self,
        index: RequestIndex,
    ) -> std::result::Result<RawResponse, RequestError>;
}

/// URL template for the job details endpoint, split around the index placeholder
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobEndpoint {
    prefix: String,
    suffix: String,
}

impl JobEndpoint {
    /// Build the endpoint from a validated config.
    ///
    /// The path is appended to the base URL as-is, so a base URL with a path
    /// component (`http://host/api`) keeps it.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let base = config.base_url.trim().trim_end_matches('/');
        // validate() guarantees exactly one placeholder
        let (head, tail) = config
            .endpoint_path
            .split_once(INDEX_PLACEHOLDER)
            .unwrap_or((config.endpoint_path.as_str(), ""));
        Ok(Self {
            prefix: format!("{}{}", base, head),
            suffix: tail.to_string(),
        })
    }

    /// Full URL for one request
    pub fn url_for(&self, index: RequestIndex) -> String {
        format!("{}{}{}", self.prefix, index, self.suffix)
    }
}

/// Production [`JobTransport`] backed by `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: JobEndpoint,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport for the endpoint described by `config`.
    ///
    /// The client carries the configured timeout as a backstop; the fan-out
    /// engine applies the authoritative per-request deadline.
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = JobEndpoint::from_config(config)?;
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            timeout: config.timeout,
        })
    }

    /// The endpoint this transport requests
    pub fn endpoint(&self) -> &JobEndpoint {
        &self.endpoint
    }
}

/// Map a `reqwest` failure onto a request error for `index`
fn classify_reqwest_error(
    index: RequestIndex,
    timeout: Duration,
    e: reqwest::Error,
) -> RequestError {
    if e.is_timeout() {
        RequestError::Timeout { index, timeout }
    } else if e.is_connect() {
        RequestError::Transport {
            index,
            message: format!("connection failed: {}", e),
        }
    } else {
        RequestError::Transport {
            index,
            message: e.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl JobTransport for HttpTransport {
    async fn get_job_details(
        &self,
        index: RequestIndex,
    ) -> std::result::Result<RawResponse, RequestError> {
        let url = self.endpoint.url_for(index);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(index, self.timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::HttpStatus {
                index,
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_reqwest_error(index, self.timeout, e))?;

        Ok(RawResponse {
            body: body.to_vec(),
            content_type,
        })
    }
}
