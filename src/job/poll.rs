//! `queryAsyncJobResult` polling loop.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{AsyncTimeoutError, CompletedJob, Job, JobError, JobFailedError, JobStatus, PollPolicy};
use crate::command::Command;
use crate::reshape;
use crate::services::asyncjob::QueryAsyncJobResult;
use crate::transport::Transport;

/// Resolves job identifiers into terminal results.
///
/// Each call to [`JobPoller::wait`] owns its own budget and state, so one
/// poller can serve concurrent waits for different jobs.
#[derive(Clone, Debug)]
pub struct JobPoller<'a, T: Transport> {
    transport: &'a T,
    policy: &'a PollPolicy,
    cancel: CancellationToken,
}

impl<'a, T: Transport> JobPoller<'a, T> {
    /// Creates a poller that issues requests through `transport`.
    #[must_use]
    pub fn new(transport: &'a T, policy: &'a PollPolicy) -> Self {
        Self {
            transport,
            policy,
            cancel: CancellationToken::new(),
        }
    }

    /// Stops waiting once `token` is cancelled. The token is checked before
    /// every poll and interrupts any pending sleep.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Polls `job_id` until it finishes.
    ///
    /// `timeout` bounds the total wait; `None` polls until the job reaches a
    /// terminal state. Sleeps between polls and transport retry delays are
    /// clipped to the remaining budget, so the timeout fires at most one poll
    /// after the budget ends.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Failed`] when the server reports a failed job,
    /// [`JobError::Timeout`] when the budget runs out,
    /// [`JobError::Transport`] once transport retries are exhausted,
    /// [`JobError::Decode`] for unreadable status responses,
    /// [`JobError::Cancelled`] on cancellation, and
    /// [`JobError::MissingJobId`] for an empty identifier.
    pub async fn wait(
        &self,
        job_id: &str,
        timeout: Option<Duration>,
    ) -> Result<CompletedJob, JobError> {
        if job_id.trim().is_empty() {
            return Err(JobError::MissingJobId);
        }

        let started = Instant::now();
        // A budget too large to represent as an instant never expires.
        let deadline = timeout.and_then(|budget| started.checked_add(budget));
        let mut polls: u32 = 0;

        loop {
            if self.cancel.is_cancelled() {
                return Err(JobError::Cancelled {
                    job_id: job_id.to_owned(),
                });
            }

            let job = self.fetch(job_id, started, deadline).await?;
            polls = polls.saturating_add(1);

            match job.status() {
                JobStatus::Succeeded => {
                    info!(job_id, polls, "async job completed");
                    return Ok(CompletedJob::from_job(job_id, job));
                }
                JobStatus::Failed(code) => {
                    warn!(job_id, status = code, "async job failed");
                    return Err(JobFailedError::from_job(job_id, &job).into());
                }
                JobStatus::Pending => {}
            }

            let Some(pause) = clip_to_deadline(deadline, self.policy.interval) else {
                return Err(timed_out(job_id, started));
            };

            debug!(job_id, polls, ?pause, "async job pending");
            self.pause(job_id, pause).await?;
        }
    }

    /// Issues one `queryAsyncJobResult`, retrying transient transport errors.
    /// Retry delays share the polling budget.
    async fn fetch(
        &self,
        job_id: &str,
        started: Instant,
        deadline: Option<Instant>,
    ) -> Result<Job, JobError> {
        let query = QueryAsyncJobResult::new(job_id);
        let params = query.params();
        let mut attempt: u32 = 1;

        loop {
            match self
                .transport
                .invoke(QueryAsyncJobResult::NAME, &params)
                .await
            {
                Ok(body) => return decode_job(job_id, &body),
                Err(err) if err.is_transient() && attempt < self.policy.transport_attempts => {
                    warn!(job_id, attempt, error = %err, "retrying async job poll");
                    attempt = attempt.saturating_add(1);
                    let Some(delay) =
                        clip_to_deadline(deadline, self.policy.transport_retry_delay)
                    else {
                        return Err(timed_out(job_id, started));
                    };
                    self.pause(job_id, delay).await?;
                }
                Err(err) => {
                    return Err(JobError::Transport {
                        job_id: job_id.to_owned(),
                        source: err,
                    });
                }
            }
        }
    }

    async fn pause(&self, job_id: &str, duration: Duration) -> Result<(), JobError> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(JobError::Cancelled {
                job_id: job_id.to_owned(),
            }),
            () = sleep(duration) => Ok(()),
        }
    }
}

/// Shortens `wanted` to the time left before `deadline`. Returns `None` once
/// the deadline has passed.
fn clip_to_deadline(deadline: Option<Instant>, wanted: Duration) -> Option<Duration> {
    let Some(limit) = deadline else {
        return Some(wanted);
    };
    let remaining = limit.saturating_duration_since(Instant::now());
    (!remaining.is_zero()).then(|| remaining.min(wanted))
}

fn timed_out(job_id: &str, started: Instant) -> JobError {
    AsyncTimeoutError {
        job_id: job_id.to_owned(),
        elapsed: started.elapsed(),
    }
    .into()
}

fn decode_job(job_id: &str, body: &[u8]) -> Result<Job, JobError> {
    reshape::unwrap_response(body)
        .and_then(reshape::decode::<Job>)
        .map_err(|source| JobError::Decode {
            job_id: job_id.to_owned(),
            source,
        })
}
