//! # jobfetch
//!
//! Fan-out client that collects job IDs from a REST job service.
//!
//! A batch issues `request_count` GET requests to
//! `{base_url}/getjobdetails/{id}` for `id` in `1..=request_count`, keeps at
//! most `concurrency` of them in flight, gives each its own timeout, and
//! returns the `jobId` of every response that decoded. Failed requests are
//! logged and counted, never fatal.
//!
//! ## Quick Start
//!
//! ```no_run
//! use jobfetch::{Config, JobFetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         concurrency: 10,
//!         ..Config::new("http://localhost:8080")
//!     };
//!
//!     let fetcher = JobFetcher::new(config)?;
//!     let report = fetcher.run_batch(100).await;
//!
//!     println!(
//!         "{} job IDs, {} failed requests",
//!         report.succeeded(),
//!         report.failures.total()
//!     );
//!     jobfetch::write_output(&report.job_ids, std::io::stdout().lock())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Bounded-concurrency batch scheduling
pub mod fanout;
/// JSON output document
pub mod output;
/// Single request execution and decoding
pub mod request;
/// Logging setup for the binary
pub mod telemetry;
/// HTTP transport
pub mod transport;
/// Core types
pub mod types;

// Re-export commonly used types
pub use config::{CliArgs, Config};
pub use error::{Error, RequestError, Result};
pub use fanout::{JobFetcher, run_batch};
pub use output::write_output;
pub use request::{decode_job_details, execute};
pub use transport::{HttpTransport, JobEndpoint, JobTransport, RawResponse};
pub use types::{
    BatchReport, FailureReason, FailureTally, JobDetails, JobId, Outcome, RequestIndex,
};
