//! Error types surfaced by the command invoker.

use std::fmt::Debug;

use thiserror::Error;

use crate::config::ConfigError;
use crate::job::{AsyncTimeoutError, JobError, JobFailedError};
use crate::reshape::ReshapeError;
use crate::transport::TransportError;

/// Errors raised by [`super::CloudStackClient`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CloudStackError {
    /// The request or a job poll failed at the transport level.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The server reported that the job failed.
    #[error(transparent)]
    JobFailed(#[from] JobFailedError),
    /// The polling budget ran out while the job was pending.
    #[error(transparent)]
    AsyncTimeout(#[from] AsyncTimeoutError),
    /// A payload did not match the expected shape.
    #[error(transparent)]
    Decode(#[from] ReshapeError),
    /// Polling was cancelled by the caller.
    #[error("polling async job {job_id} was cancelled")]
    Cancelled {
        /// Job being polled.
        job_id: String,
    },
    /// An asynchronous command answered without a job id.
    #[error("{command} returned no job id")]
    MissingJobId {
        /// Command that was invoked.
        command: String,
    },
    /// The client could not be built from configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<JobError> for CloudStackError {
    fn from(value: JobError) -> Self {
        match value {
            JobError::MissingJobId => Self::MissingJobId {
                command: String::from("queryAsyncJobResult"),
            },
            JobError::Transport { source, .. } => Self::Transport(source),
            JobError::Failed(failure) => Self::JobFailed(failure),
            JobError::Timeout(timeout) => Self::AsyncTimeout(timeout),
            JobError::Decode { source, .. } => Self::Decode(source),
            JobError::Cancelled { job_id } => Self::Cancelled { job_id },
        }
    }
}

/// Error returned by [`super::CloudStackClient::execute`].
///
/// A polling timeout keeps the partial response decoded from the initial
/// call, which carries the job id, so callers can resume polling later.
#[derive(Debug, Error)]
pub enum CommandError<R: Debug> {
    /// The job was still pending when the polling budget ran out.
    #[error("{source}")]
    Timeout {
        /// Response decoded before polling started.
        partial: Box<R>,
        /// Timeout details.
        #[source]
        source: AsyncTimeoutError,
    },
    /// Any other failure.
    #[error(transparent)]
    Failed(#[from] CloudStackError),
}

impl<R: Debug> CommandError<R> {
    /// Reports whether the command timed out while its job was pending.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns the partial response kept on timeout.
    #[must_use]
    pub fn partial(&self) -> Option<&R> {
        match self {
            Self::Timeout { partial, .. } => Some(&**partial),
            Self::Failed(_) => None,
        }
    }

    /// Consumes the error, returning the partial response kept on timeout.
    #[must_use]
    pub fn into_partial(self) -> Option<R> {
        match self {
            Self::Timeout { partial, .. } => Some(*partial),
            Self::Failed(_) => None,
        }
    }

    /// Discards any partial response and returns the underlying error.
    #[must_use]
    pub fn into_error(self) -> CloudStackError {
        match self {
            Self::Timeout { source, .. } => CloudStackError::AsyncTimeout(source),
            Self::Failed(err) => err,
        }
    }
}
