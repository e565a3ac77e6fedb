//! Asynchronous job model and completion polling.
//!
//! Commands that the management server runs asynchronously answer with a
//! job identifier. [`JobPoller`] resolves that identifier into the job's
//! terminal result by calling `queryAsyncJobResult` until the job leaves the
//! pending state, the polling budget runs out, or the caller cancels.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

mod error;
mod poll;

pub use error::{AsyncTimeoutError, JobError, JobFailedError};
pub use poll::JobPoller;

use crate::command::sync_response;

/// Default delay between polls of a pending job.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Default number of attempts per poll before a transient transport error
/// is surfaced.
pub const DEFAULT_TRANSPORT_ATTEMPTS: u32 = 3;
/// Default delay between transport retries.
pub const DEFAULT_TRANSPORT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Poll cadence and transport retry policy.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PollPolicy {
    /// Delay between polls while the job is pending.
    pub interval: Duration,
    /// Attempts per poll; transient transport errors are retried until this
    /// many attempts have failed.
    pub transport_attempts: u32,
    /// Delay between transport retries.
    pub transport_retry_delay: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            transport_attempts: DEFAULT_TRANSPORT_ATTEMPTS,
            transport_retry_delay: DEFAULT_TRANSPORT_RETRY_DELAY,
        }
    }
}

/// Lifecycle state derived from `jobstatus`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum JobStatus {
    /// `0`: queued or running.
    Pending,
    /// `1`: finished successfully.
    Succeeded,
    /// Any other code, normally `2`.
    Failed(i64),
}

impl JobStatus {
    /// Maps a raw `jobstatus` code onto a [`JobStatus`].
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Pending,
            1 => Self::Succeeded,
            other => Self::Failed(other),
        }
    }

    /// Reports whether the job has stopped changing.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Job record returned by `queryAsyncJobResult` and `listAsyncJobs`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Job {
    /// Server-assigned job identifier.
    #[serde(rename = "jobid")]
    pub job_id: String,
    /// Raw status code; see [`JobStatus`].
    #[serde(rename = "jobstatus")]
    pub job_status: i64,
    /// Progress indicator reported by the server.
    #[serde(rename = "jobprocstatus")]
    pub job_proc_status: i64,
    /// Result code of a finished job.
    #[serde(rename = "jobresultcode")]
    pub job_result_code: i64,
    /// Tag describing `job_result`, for example `object` or `text`.
    #[serde(rename = "jobresulttype")]
    pub job_result_type: String,
    /// Command-specific result payload, present once the job finishes.
    #[serde(rename = "jobresult")]
    pub job_result: Option<Value>,
    /// API command class that spawned the job.
    pub cmd: String,
    /// Type of the resource the job acts on.
    #[serde(rename = "jobinstancetype")]
    pub job_instance_type: Option<String>,
    /// Identifier of the resource the job acts on.
    #[serde(rename = "jobinstanceid")]
    pub job_instance_id: Option<String>,
    /// Account that submitted the job.
    #[serde(rename = "accountid")]
    pub account_id: Option<String>,
    /// User that submitted the job.
    #[serde(rename = "userid")]
    pub user_id: Option<String>,
    /// Submission timestamp.
    pub created: Option<String>,
    /// Completion timestamp.
    pub completed: Option<String>,
}

impl Job {
    /// Returns the lifecycle state.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        JobStatus::from_code(self.job_status)
    }
}

sync_response!(Job);

/// Result of a job that finished successfully.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedJob {
    /// Identifier of the finished job.
    pub job_id: String,
    /// Tag describing `result`.
    pub result_type: String,
    /// Raw `jobresult` payload, not yet reshaped.
    pub result: Value,
}

impl CompletedJob {
    fn from_job(job_id: &str, job: Job) -> Self {
        Self {
            job_id: job_id.to_owned(),
            result_type: job.job_result_type,
            result: job.job_result.unwrap_or(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests;
