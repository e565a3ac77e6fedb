//! Command invoker tying the transport, poller and reshaper together.
//!
//! [`CloudStackClient::execute`] issues a command and, for asynchronous
//! commands in async mode, polls the spawned job and reshapes its result so
//! callers receive the same response type either way.

mod error;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub use error::{CloudStackError, CommandError};

use crate::command::{Command, CommandResponse};
use crate::config::{ClientOptions, CloudStackConfig};
use crate::job::{CompletedJob, Job, JobError, JobPoller};
use crate::reshape::{self, ResultShape};
use crate::services::asyncjob::QueryAsyncJobResult;
use crate::transport::{CommandParams, HttpTransport, Transport};

/// CloudStack API client.
///
/// Options are fixed at construction. The client holds no per-call state, so
/// a shared reference can drive any number of concurrent commands.
#[derive(Clone, Debug)]
pub struct CloudStackClient<T: Transport> {
    transport: T,
    options: ClientOptions,
    cancel: CancellationToken,
}

impl CloudStackClient<HttpTransport> {
    /// Builds an HTTP-backed client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CloudStackError::Config`] when the configuration is invalid.
    pub fn from_config(config: &CloudStackConfig) -> Result<Self, CloudStackError> {
        let options = config.client_options()?;
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::new(options, transport))
    }
}

impl<T: Transport> CloudStackClient<T> {
    /// Creates a client issuing commands through `transport`.
    #[must_use]
    pub fn new(options: ClientOptions, transport: T) -> Self {
        Self {
            transport,
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// Aborts job polling once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Returns the options the client was built with.
    #[must_use]
    pub const fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn poller(&self) -> JobPoller<'_, T> {
        JobPoller::new(&self.transport, &self.options.poll).with_cancellation(self.cancel.clone())
    }

    /// Runs `command` and decodes its response.
    ///
    /// Synchronous commands are decoded straight from the reply. For
    /// asynchronous commands the initial reply only carries the job id: with
    /// async mode off it is returned as is, otherwise the job is polled to
    /// completion and its result reshaped into `C::Response`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Timeout`] with the partial response when the
    /// polling budget runs out, and [`CommandError::Failed`] otherwise.
    pub async fn execute<C: Command>(
        &self,
        command: &C,
    ) -> Result<C::Response, CommandError<C::Response>> {
        let params = command.params();
        let body = self
            .transport
            .invoke(C::NAME, &params)
            .await
            .map_err(CloudStackError::from)?;
        let payload = reshape::unwrap_response(&body).map_err(CloudStackError::from)?;

        if !C::ASYNC {
            return Ok(reshape::reshape(payload, C::SHAPE, C::NUMERIC_FIELDS)
                .map_err(CloudStackError::from)?);
        }

        let job_id = job_id_of(&payload).ok_or_else(|| CloudStackError::MissingJobId {
            command: C::NAME.to_owned(),
        })?;
        let mut partial: C::Response =
            reshape::reshape(payload, ResultShape::Flat, C::NUMERIC_FIELDS).unwrap_or_else(
                |err| {
                    warn!(
                        command = C::NAME,
                        job_id = %job_id,
                        error = %err,
                        "initial async reply did not decode; keeping job id only"
                    );
                    C::Response::default()
                },
            );
        partial.set_job_id(&job_id);

        if !self.options.async_mode {
            debug!(command = C::NAME, job_id = %job_id, "async mode off, returning job id");
            return Ok(partial);
        }

        info!(command = C::NAME, job_id = %job_id, "waiting for async job");
        let completed = match self.poller().wait(&job_id, self.options.timeout).await {
            Ok(completed) => completed,
            Err(JobError::Timeout(source)) => {
                return Err(CommandError::Timeout {
                    partial: Box::new(partial),
                    source,
                });
            }
            Err(err) => return Err(CloudStackError::from(err).into()),
        };

        let mut response: C::Response =
            reshape::reshape(completed.result, C::SHAPE, C::NUMERIC_FIELDS)
                .map_err(CloudStackError::from)?;
        response.set_job_id(&completed.job_id);
        Ok(response)
    }

    /// Invokes `command` by name and returns its payload with the response
    /// envelope stripped.
    ///
    /// # Errors
    ///
    /// Returns [`CloudStackError::Transport`] or [`CloudStackError::Decode`].
    pub async fn invoke_raw(
        &self,
        command: &str,
        params: &CommandParams,
    ) -> Result<Value, CloudStackError> {
        let body = self.transport.invoke(command, params).await?;
        Ok(reshape::unwrap_response(&body)?)
    }

    /// Fetches the current state of `job_id` without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`CloudStackError`] when the query fails.
    pub async fn query_async_job_result(&self, job_id: &str) -> Result<Job, CloudStackError> {
        self.execute(&QueryAsyncJobResult::new(job_id))
            .await
            .map_err(CommandError::into_error)
    }

    /// Polls `job_id` until it finishes, within the configured budget.
    ///
    /// # Errors
    ///
    /// Returns [`CloudStackError::AsyncTimeout`] when the budget runs out and
    /// [`CloudStackError::JobFailed`] when the job fails.
    pub async fn wait_for_job(&self, job_id: &str) -> Result<CompletedJob, CloudStackError> {
        Ok(self.poller().wait(job_id, self.options.timeout).await?)
    }
}

/// Extracts a non-empty `jobid` string from an initial async reply.
#[must_use]
pub fn job_id_of(payload: &Value) -> Option<String> {
    payload
        .get("jobid")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
}
