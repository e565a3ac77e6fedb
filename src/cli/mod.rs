//! Command-line interface definitions for the `cloudstack` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::Parser;

/// Top-level CLI for the `cloudstack` binary.
#[derive(Debug, Parser)]
#[command(
    name = "cloudstack",
    about = "Invoke CloudStack API commands and wait for async jobs",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Invoke an API command by name.
    #[command(name = "call", about = "Invoke an API command by name")]
    Call(CallCommand),
    /// Wait for an async job and print its result.
    #[command(name = "wait", about = "Wait for an async job and print its result")]
    Wait(WaitCommand),
}

/// Arguments for the `cloudstack call` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct CallCommand {
    /// Return the job id immediately instead of waiting for async jobs.
    #[arg(long)]
    pub(crate) no_wait: bool,
    /// API command name, for example `listZones`.
    #[arg(value_name = "COMMAND")]
    pub(crate) command: String,
    /// Command parameters as `key=value` pairs.
    #[arg(value_name = "KEY=VALUE")]
    pub(crate) params: Vec<String>,
}

/// Arguments for the `cloudstack wait` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct WaitCommand {
    /// Identifier of the job to wait for.
    #[arg(value_name = "JOBID")]
    pub(crate) job_id: String,
}
