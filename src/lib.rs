//! Client library for the Apache CloudStack management-server API.
//!
//! Commands are typed parameter builders implementing [`Command`]. The
//! [`CloudStackClient`] issues them through a [`Transport`] and, for
//! asynchronous commands, polls the spawned job with the [`JobPoller`] and
//! reshapes its result so callers get the same response type as a
//! synchronous call would produce.

pub mod client;
pub mod command;
pub mod config;
pub mod job;
pub mod reshape;
pub mod services;
pub mod test_support;
pub mod transport;

pub use client::{CloudStackClient, CloudStackError, CommandError};
pub use command::{Command, CommandResponse};
pub use config::{ClientOptions, CloudStackConfig, ConfigError};
pub use job::{
    AsyncTimeoutError, CompletedJob, Job, JobError, JobFailedError, JobPoller, JobStatus,
    PollPolicy,
};
pub use reshape::{ReshapeError, ResultShape};
pub use transport::{CommandParams, HttpTransport, Transport, TransportError};
