//! Bounded-concurrency fan-out over the job details endpoint.
//!
//! A batch issues `request_count` requests indexed `1..=request_count`. At most
//! `concurrency` of them are in flight at any instant; as soon as one reaches a
//! terminal outcome the next pending index is admitted. Per-request failures
//! are logged and tallied but never abort the batch, and the call returns only
//! once every index has settled.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::request::execute;
use crate::transport::{HttpTransport, JobTransport};
use crate::types::{BatchReport, RequestIndex};


/// Service for collecting job IDs from the job details endpoint.
///
/// Holds a validated [`Config`] and a transport shared by every request. One
/// fetcher can run any number of batches.
pub struct JobFetcher {
    config: Config,
    transport: Arc<dyn JobTransport>,
}

impl JobFetcher {
    /// Create a fetcher that talks HTTP to `config.base_url`.
    ///
    /// Fails with [`Error::Config`] if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a fetcher over a custom transport
    pub fn with_transport(config: Config, transport: Arc<dyn JobTransport>) -> Result<Self> {
        config.validate()?;
        tracing::info!(base_url = %config.base_url, "Using base URL");
        Ok(Self { config, transport })
    }

    /// The configuration this fetcher was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a batch of `request_count` requests and wait for all of them.
    pub async fn run_batch(&self, request_count: u32) -> BatchReport {
        collect_outcomes(
            self.transport.as_ref(),
            request_count,
            self.config.concurrency,
            self.config.timeout,
        )
        .await
    }

    /// Run a batch of the configured size
    pub async fn run_configured_batch(&self) -> BatchReport {
        self.run_batch(self.config.request_count).await
    }

    /// Run a batch and return only the successful job IDs, in no particular order
    pub async fn request_job_ids(&self, request_count: u32) -> Vec<String> {
        self.run_batch(request_count).await.into_job_ids()
    }
}

/// Run one batch over `transport`.
///
/// Returns [`Error::Config`] before any request is made when `concurrency` is
/// zero or `timeout` is zero. Individual request failures are never returned
/// as errors; they appear only in [`BatchReport::failures`].
pub async fn run_batch(
    transport: &dyn JobTransport,
    request_count: u32,
    concurrency: usize,
    timeout: Duration,
) -> Result<BatchReport> {
    if concurrency == 0 {
        return Err(Error::config("concurrency", "concurrency must be at least 1"));
    }
    if timeout.is_zero() {
        return Err(Error::config(
            "timeout_seconds",
            "timeout must be greater than zero",
        ));
    }
    Ok(collect_outcomes(transport, request_count, concurrency, timeout).await)
}

/// Drive every index to a terminal outcome with a sliding admission window.
///
/// `buffer_unordered` keeps up to `concurrency` request futures alive and
/// pulls the next index the moment any of them completes.
async fn collect_outcomes(
    transport: &dyn JobTransport,
    request_count: u32,
    concurrency: usize,
    timeout: Duration,
) -> BatchReport {
    if request_count == 0 {
        tracing::info!("No job IDs requested");
        return BatchReport::new(0);
    }

    tracing::info!(
        request_count,
        concurrency,
        timeout = ?timeout,
        "Requesting job IDs"
    );
    let batch_start = Instant::now();

    let report = stream::iter(RequestIndex::range(request_count))
        .map(move |index| execute(transport, index, timeout))
        .buffer_unordered(concurrency)
        .fold(BatchReport::new(request_count), |mut report, outcome| async move {
            report.record(outcome);
            report
        })
        .await;

    let failed = report.failures.total();
    if failed > 0 {
        tracing::warn!(
            succeeded = report.succeeded(),
            failed,
            timeout = report.failures.timeout,
            transport = report.failures.transport,
            http_status = report.failures.http_status,
            decode = report.failures.decode,
            elapsed_ms = batch_start.elapsed().as_millis() as u64,
            "Batch finished with failures"
        );
    } else {
        tracing::info!(
            succeeded = report.succeeded(),
            elapsed_ms = batch_start.elapsed().as_millis() as u64,
            "Batch finished"
        );
    }

    report
}
