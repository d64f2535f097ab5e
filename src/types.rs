//! Core types for jobfetch

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Position of a request within a batch, in `1..=request_count`.
///
/// Only used to build the request path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestIndex(pub u32);

impl RequestIndex {
    /// Create a new RequestIndex
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the inner u32 value
    pub fn get(&self) -> u32 {
        self.0
    }

    /// All indices of a batch with `count` requests, starting at 1
    pub fn range(count: u32) -> impl Iterator<Item = RequestIndex> {
        (1..=count).map(RequestIndex)
    }
}

impl std::fmt::Display for RequestIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque job identifier returned by a successful request. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Wrap a non-empty identifier, returning `None` for the empty string
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    /// Borrow the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the identifier
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body returned by the job details endpoint.
///
/// Unknown fields are ignored so newer servers can add fields freely.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetails {
    /// Job UUID
    #[serde(rename = "jobId")]
    pub job_id: String,
}

/// Terminal result of one request. Produced exactly once per index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The body decoded and carried an identifier
    Success(JobId),
    /// The request failed; see [`RequestError::reason`]
    Failure(RequestError),
}

impl Outcome {
    /// True for [`Outcome::Success`]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

impl From<std::result::Result<JobId, RequestError>> for Outcome {
    fn from(result: std::result::Result<JobId, RequestError>) -> Self {
        match result {
            Ok(id) => Outcome::Success(id),
            Err(e) => Outcome::Failure(e),
        }
    }
}

/// Classification of a failed request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Deadline elapsed before the body was read
    Timeout,
    /// Connection-level failure
    Transport,
    /// Non-success HTTP status
    HttpStatus,
    /// Body did not decode into [`JobDetails`]
    Decode,
}

impl FailureReason {
    /// Stable name used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::Timeout => "timeout",
            FailureReason::Transport => "transport",
            FailureReason::HttpStatus => "http_status",
            FailureReason::Decode => "decode",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-reason count of failed requests in a batch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureTally {
    /// Requests that timed out
    pub timeout: usize,
    /// Requests that failed at the transport level
    pub transport: usize,
    /// Requests answered with a non-success status
    pub http_status: usize,
    /// Requests whose body could not be decoded
    pub decode: usize,
}

impl FailureTally {
    /// Count one failure
    pub fn record(&mut self, reason: FailureReason) {
        match reason {
            FailureReason::Timeout => self.timeout += 1,
            FailureReason::Transport => self.transport += 1,
            FailureReason::HttpStatus => self.http_status += 1,
            FailureReason::Decode => self.decode += 1,
        }
    }

    /// Number of failures for one reason
    pub fn count(&self, reason: FailureReason) -> usize {
        match reason {
            FailureReason::Timeout => self.timeout,
            FailureReason::Transport => self.transport,
            FailureReason::HttpStatus => self.http_status,
            FailureReason::Decode => self.decode,
        }
    }

    /// Total failures across all reasons
    pub fn total(&self) -> usize {
        self.timeout + self.transport + self.http_status + self.decode
    }
}

/// Result of a completed batch.
///
/// `job_ids` holds the identifiers of every successful request in completion
/// order, which callers must not rely on. Duplicates returned by the server
/// are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Number of requests issued
    pub requested: u32,
    /// Identifiers from successful requests
    pub job_ids: Vec<JobId>,
    /// Failed requests by reason
    pub failures: FailureTally,
}

impl BatchReport {
    /// Empty report for a batch of `requested` requests
    pub fn new(requested: u32) -> Self {
        Self {
            requested,
            job_ids: Vec::new(),
            failures: FailureTally::default(),
        }
    }

    /// Fold one outcome into the report
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success(id) => self.job_ids.push(id),
            Outcome::Failure(e) => self.failures.record(e.reason()),
        }
    }

    /// Number of successful requests
    pub fn succeeded(&self) -> usize {
        self.job_ids.len()
    }

    /// Identifiers as plain strings
    pub fn into_job_ids(self) -> Vec<String> {
        self.job_ids.into_iter().map(JobId::into_inner).collect()
    }
}
