//! Final JSON document: `{ "jobs": [ ... ] }`.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;

/// Shape of the document written to stdout
#[derive(Debug, Serialize)]
pub struct JobsOutput<'a, T> {
    /// Job IDs in the order they were collected
    pub jobs: &'a [T],
}

/// Pretty-print `job_ids` as `{ "jobs": [...] }` to `writer`, followed by a newline.
///
/// A failure here is reported to the caller; it says nothing about which
/// requests succeeded.
pub fn write_output<T, W>(job_ids: &[T], mut writer: W) -> Result<()>
where
    T: Serialize,
    W: Write,
{
    serde_json::to_writer_pretty(&mut writer, &JobsOutput { jobs: job_ids })?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
