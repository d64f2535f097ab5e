//! Single request execution: fetch one index, decode it, classify the result.

use std::time::Duration;

use crate::error::RequestError;
use crate::transport::{JobTransport, RawResponse};
use crate::types::{JobDetails, JobId, Outcome, RequestIndex};

/// Decode a job details body into its identifier.
///
/// Unknown fields are ignored. A missing, non-string, or empty `jobId` is a
/// decode failure.
pub fn decode_job_details(
    index: RequestIndex,
    body: &[u8],
) -> std::result::Result<JobId, RequestError> {
    let details: JobDetails = serde_json::from_slice(body).map_err(|e| RequestError::Decode {
        index,
        message: e.to_string(),
    })?;

    JobId::new(details.job_id).ok_or_else(|| RequestError::Decode {
        index,
        message: "jobId is empty".to_string(),
    })
}

/// Fetch and decode one request under `timeout`.
///
/// The deadline covers sending, waiting for headers, and reading the body.
/// When it elapses the in-flight request is dropped, which releases its
/// connection and its concurrency slot.
pub async fn fetch_job_id(
    transport: &dyn JobTransport,
    index: RequestIndex,
    timeout: Duration,
) -> std::result::Result<JobId, RequestError> {
    tracing::debug!(request_index = index.get(), "Getting job details");

    let RawResponse { body, content_type } =
        match tokio::time::timeout(timeout, transport.get_job_details(index)).await {
            Ok(result) => result?,
            Err(_) => return Err(RequestError::Timeout { index, timeout }),
        };

    decode_job_details(index, &body).inspect_err(|_| {
        tracing::debug!(
            request_index = index.get(),
            content_type = content_type.as_deref().unwrap_or("none"),
            body_len = body.len(),
            "Response body did not decode"
        );
    })
}

/// Run one request to a terminal [`Outcome`]. Never fails; failures are
/// logged and returned as [`Outcome::Failure`].
pub async fn execute(
    transport: &dyn JobTransport,
    index: RequestIndex,
    timeout: Duration,
) -> Outcome {
    fetch_job_id(transport, index, timeout)
        .await
        .inspect(|id| {
            tracing::trace!(request_index = index.get(), job_id = %id, "Retrieved job id");
        })
        .inspect_err(|e| {
            tracing::error!(
                request_index = index.get(),
                reason = %e.reason(),
                error = %e,
                "Failed to retrieve job details"
            );
        })
        .into()
}
