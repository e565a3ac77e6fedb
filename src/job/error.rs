//! Error types for job polling.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use super::Job;
use crate::reshape::ReshapeError;
use crate::transport::TransportError;

/// Raised when the polling budget runs out while the job is still pending.
///
/// The job may still complete later; callers can keep the job id and poll
/// again.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("timed out after {elapsed:?} waiting for async job {job_id}")]
pub struct AsyncTimeoutError {
    /// Identifier of the job that was still pending.
    pub job_id: String,
    /// Time spent polling before giving up.
    pub elapsed: Duration,
}

/// Raised when the server reports that a job failed.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error(
    "async job {job_id} failed with status {status} and result code {result_code}: {}",
    .error_text.as_deref().unwrap_or("no error text")
)]
pub struct JobFailedError {
    /// Identifier of the failed job.
    pub job_id: String,
    /// Raw `jobstatus` code.
    pub status: i64,
    /// `jobresultcode` reported with the job.
    pub result_code: i64,
    /// `errorcode` from the job result, when present.
    pub error_code: Option<i64>,
    /// `errortext` from the job result, when present.
    pub error_text: Option<String>,
}

impl JobFailedError {
    pub(super) fn from_job(job_id: &str, job: &Job) -> Self {
        let result = job.job_result.as_ref();
        Self {
            job_id: job_id.to_owned(),
            status: job.job_status,
            result_code: job.job_result_code,
            error_code: result
                .and_then(|value| value.get("errorcode"))
                .and_then(Value::as_i64),
            error_text: result
                .and_then(|value| value.get("errortext"))
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }
}

/// Errors raised by [`super::JobPoller`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum JobError {
    /// The job identifier was empty.
    #[error("async job id must not be empty")]
    MissingJobId,
    /// `queryAsyncJobResult` kept failing at the transport level.
    #[error("polling async job {job_id} failed: {source}")]
    Transport {
        /// Job being polled.
        job_id: String,
        /// Last transport failure.
        #[source]
        source: TransportError,
    },
    /// The server reported that the job failed.
    #[error(transparent)]
    Failed(#[from] JobFailedError),
    /// The polling budget ran out.
    #[error(transparent)]
    Timeout(#[from] AsyncTimeoutError),
    /// The job status response could not be decoded.
    #[error("failed to decode status of async job {job_id}: {source}")]
    Decode {
        /// Job being polled.
        job_id: String,
        /// Decoding failure.
        #[source]
        source: ReshapeError,
    },
    /// The caller cancelled the wait.
    #[error("polling async job {job_id} was cancelled")]
    Cancelled {
        /// Job being polled.
        job_id: String,
    },
}
