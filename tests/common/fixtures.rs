//! Job details fixtures and mock endpoint helpers

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Deterministic UUID-shaped job ID for request `index`
pub fn job_id(index: u32) -> String {
    format!("{:08x}-8663-4170-9bc3-{:012x}", index, u64::from(index) * 7919)
}

/// Job details body with a few fields the client does not know about
pub fn job_body(job_id: &str) -> serde_json::Value {
    serde_json::json!({
        "jobId": job_id,
        "status": "queued",
        "submittedBy": "integration-test",
        "attempts": 0,
    })
}

/// Path requested for `index`
pub fn job_path(index: u32) -> String {
    format!("/getjobdetails/{}", index)
}

/// Mount a JSON job details response for `index`, expected to be hit exactly once
pub async fn mount_job(server: &MockServer, index: u32, delay: Duration) -> String {
    let id = job_id(index);
    Mock::given(method("GET"))
        .and(path(job_path(index)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(job_body(&id))
                .set_delay(delay),
        )
        .expect(1)
        .mount(server)
        .await;
    id
}

/// Mount job responses for `1..=count` and return their IDs
pub async fn mount_jobs(server: &MockServer, count: u32, delay: Duration) -> Vec<String> {
    let mut ids = Vec::with_capacity(count as usize);
    for index in 1..=count {
        ids.push(mount_job(server, index, delay).await);
    }
    ids
}

/// Mount an arbitrary response for `index`
pub async fn mount_response(server: &MockServer, index: u32, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(job_path(index)))
        .respond_with(response)
        .mount(server)
        .await;
}
