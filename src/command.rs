//! Contract shared by every generated API command.

use std::fmt::Debug;

use serde::de::DeserializeOwned;

use crate::reshape::ResultShape;
use crate::transport::CommandParams;

/// One CloudStack API command and the response it produces.
pub trait Command: Send + Sync {
    /// API command name, for example `createFirewallRule`.
    const NAME: &'static str;
    /// Whether the server runs the command as an asynchronous job.
    const ASYNC: bool = false;
    /// Where the response object sits in the final payload: the synchronous
    /// response for sync commands, the job result for async ones.
    const SHAPE: ResultShape = ResultShape::Flat;
    /// Fields the server may encode as strings that must decode as integers.
    const NUMERIC_FIELDS: &'static [&'static str] = &[];

    /// Typed response produced by the command.
    type Response: CommandResponse;

    /// Renders the command arguments.
    fn params(&self) -> CommandParams;
}

/// Response type produced by a [`Command`].
pub trait CommandResponse: DeserializeOwned + Default + Debug + Send {
    /// Records the job identifier that produced the response. Responses of
    /// synchronous commands ignore it.
    fn set_job_id(&mut self, _job_id: &str) {}
}

/// Implements [`CommandResponse`] for response types of synchronous
/// commands.
macro_rules! sync_response {
    ($($name:ty),+ $(,)?) => {
        $(impl $crate::command::CommandResponse for $name {})+
    };
}

/// Implements [`CommandResponse`] for response types carrying a `job_id`
/// field.
macro_rules! async_response {
    ($($name:ty),+ $(,)?) => {
        $(
            impl $crate::command::CommandResponse for $name {
                fn set_job_id(&mut self, job_id: &str) {
                    job_id.clone_into(&mut self.job_id);
                }
            }
        )+
    };
}

pub(crate) use async_response;
pub(crate) use sync_response;
