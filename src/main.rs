//! Binary entry point for the `cloudstack` CLI.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use serde_json::{Value, json};
use thiserror::Error;

use cloudstack::client::job_id_of;
use cloudstack::services::asyncjob::QueryAsyncJobResult;
use cloudstack::{
    AsyncTimeoutError, CloudStackClient, CloudStackConfig, CloudStackError, Command,
    CommandParams, CompletedJob, ConfigError, Transport,
};

mod cli;

use cli::{CallCommand, Cli, WaitCommand};

/// Exit code reported when a job is still pending after the polling budget.
const EXIT_TIMEOUT: i32 = 2;

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] CloudStackError),
    #[error("invalid parameter {0:?}: expected key=value")]
    InvalidParam(String),
    #[error("failed to write output: {0}")]
    Output(String),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let exit_code = match dispatch(cli).await {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

async fn dispatch(cli: Cli) -> Result<i32, CliError> {
    let config = CloudStackConfig::load_without_cli_args()?;
    let client = CloudStackClient::from_config(&config)?;
    let mut stdout = io::stdout();

    match cli {
        Cli::Call(args) => exec_call(&client, &args, &mut stdout).await,
        Cli::Wait(args) => exec_wait(&client, &args, &mut stdout).await,
    }
}

async fn exec_call<T: Transport>(
    client: &CloudStackClient<T>,
    args: &CallCommand,
    out: &mut impl Write,
) -> Result<i32, CliError> {
    let params = parse_params(&args.params)?;
    let payload = client.invoke_raw(&args.command, &params).await?;

    // A job status query carries the job id it asks about; print it as is.
    let is_status_query = args.command.eq_ignore_ascii_case(QueryAsyncJobResult::NAME);
    let wait = !args.no_wait && !is_status_query && client.options().async_mode;
    let Some(job_id) = job_id_of(&payload).filter(|_| wait) else {
        write_json(out, &payload)?;
        return Ok(0);
    };

    finish(client.wait_for_job(&job_id).await, out)
}

async fn exec_wait<T: Transport>(
    client: &CloudStackClient<T>,
    args: &WaitCommand,
    out: &mut impl Write,
) -> Result<i32, CliError> {
    finish(client.wait_for_job(&args.job_id).await, out)
}

fn finish(
    outcome: Result<CompletedJob, CloudStackError>,
    out: &mut impl Write,
) -> Result<i32, CliError> {
    match outcome {
        Ok(completed) => {
            write_json(out, &completed.result)?;
            Ok(0)
        }
        Err(CloudStackError::AsyncTimeout(timeout)) => report_timeout(out, &timeout),
        Err(err) => Err(err.into()),
    }
}

fn report_timeout(out: &mut impl Write, timeout: &AsyncTimeoutError) -> Result<i32, CliError> {
    write_json(out, &json!({ "jobid": timeout.job_id }))?;
    writeln!(io::stderr(), "{timeout}").ok();
    Ok(EXIT_TIMEOUT)
}

fn parse_params(raw: &[String]) -> Result<CommandParams, CliError> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_owned(), value.to_owned()))
            }
            _ => Err(CliError::InvalidParam(pair.clone())),
        })
        .collect()
}

fn write_json(out: &mut impl Write, value: &Value) -> Result<(), CliError> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|err| CliError::Output(err.to_string()))?;
    writeln!(out, "{rendered}").map_err(|err| CliError::Output(err.to_string()))
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}
