//! BDD step definitions for async job completion.

use cloudstack::{CloudStackClient, CloudStackError};
use cloudstack::services::firewall::CreateFirewallRule;
use rstest_bdd_macros::{given, then, when};
use serde_json::json;
use tokio::runtime::Builder;
use tokio::time::Instant;

use super::test_helpers::{PollingContext, PollingOutcome};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
}

const STALLED_POLLS: usize = 32;

#[given("an async job \"{job_id}\" submitted by createFirewallRule")]
fn job_submitted(mut polling_context: PollingContext, job_id: String) -> PollingContext {
    polling_context.job_id = job_id.trim().to_owned();
    polling_context.transport.push_json(&json!({
        "createfirewallruleresponse": {"jobid": polling_context.job_id, "id": "rule-1"}
    }));
    polling_context
}

#[given("the job reports pending {count:u32} times")]
fn job_pending(polling_context: PollingContext, count: u32) -> PollingContext {
    for _ in 0..count {
        polling_context.transport.push_pending(&polling_context.job_id);
    }
    polling_context
}

#[given("the job stays pending")]
fn job_stalled(polling_context: PollingContext) -> PollingContext {
    for _ in 0..STALLED_POLLS {
        polling_context.transport.push_pending(&polling_context.job_id);
    }
    polling_context
}

#[given("the job then succeeds with string ports \"{start}\" and \"{end}\"")]
fn job_succeeds(polling_context: PollingContext, start: String, end: String) -> PollingContext {
    polling_context.transport.push_succeeded(
        &polling_context.job_id,
        json!({"firewallrule": {
            "id": "rule-1",
            "protocol": "tcp",
            "startport": start.trim(),
            "endport": end.trim()
        }}),
    );
    polling_context
}

#[given("the job then fails with result code {code:i64}")]
fn job_fails(polling_context: PollingContext, code: i64) -> PollingContext {
    polling_context
        .transport
        .push_failed(&polling_context.job_id, code, "rule conflicts with an existing rule");
    polling_context
}

#[given("the transport refuses {count:u32} connections")]
fn transport_refuses(polling_context: PollingContext, count: u32) -> PollingContext {
    for _ in 0..count {
        polling_context.transport.push_connection_refused();
    }
    polling_context
}

#[given("a polling budget of {secs:u64} seconds")]
fn polling_budget(mut polling_context: PollingContext, secs: u64) -> PollingContext {
    polling_context.options.timeout = Some(std::time::Duration::from_secs(secs));
    polling_context
}

#[when("the client executes the command")]
fn execute_command(mut polling_context: PollingContext) -> Result<PollingContext, StepError> {
    let runtime = Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .map_err(|err| StepError::Assertion(err.to_string()))?;
    let client = CloudStackClient::new(
        polling_context.options.clone(),
        polling_context.transport.clone(),
    );
    let command = CreateFirewallRule::new("ip-1", "tcp").ports(80, 8080);

    let (result, elapsed) = runtime.block_on(async move {
        let started = Instant::now();
        let result = client.execute(&command).await;
        (result, started.elapsed())
    });

    polling_context.outcome = Some(PollingOutcome::from_result(result));
    polling_context.elapsed = elapsed;
    Ok(polling_context)
}

#[then("the response has start port {start:u16} and end port {end:u16}")]
fn response_ports(polling_context: &PollingContext, start: u16, end: u16) -> Result<(), StepError> {
    let Some(PollingOutcome::Completed(response)) = &polling_context.outcome else {
        return Err(StepError::Assertion(format!(
            "expected a completed command, got {:?}",
            polling_context.outcome
        )));
    };
    if response.job_id != polling_context.job_id {
        return Err(StepError::Assertion(format!(
            "expected job id {}, got {}",
            polling_context.job_id, response.job_id
        )));
    }
    if response.rule.start_port == Some(start) && response.rule.end_port == Some(end) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected ports {start}-{end}, got {:?}",
            response.rule
        )))
    }
}

#[then("the command fails with a job failure carrying code {code:i64}")]
fn job_failure(polling_context: &PollingContext, code: i64) -> Result<(), StepError> {
    match &polling_context.outcome {
        Some(PollingOutcome::Failed(CloudStackError::JobFailed(failure)))
            if failure.result_code == code =>
        {
            Ok(())
        }
        other => Err(StepError::Assertion(format!(
            "expected job failure with code {code}, got {other:?}"
        ))),
    }
}

#[then("the command times out with a partial response for \"{job_id}\"")]
fn timed_out(polling_context: &PollingContext, job_id: String) -> Result<(), StepError> {
    match &polling_context.outcome {
        Some(PollingOutcome::TimedOut(partial)) if partial.job_id == job_id.trim() => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected timeout keeping job {job_id}, got {other:?}"
        ))),
    }
}

#[then("the client slept for {secs:u64} seconds")]
fn slept_for(polling_context: &PollingContext, secs: u64) -> Result<(), StepError> {
    if polling_context.elapsed.as_secs() == secs && polling_context.elapsed.subsec_nanos() == 0 {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {secs}s of polling, got {:?}",
            polling_context.elapsed
        )))
    }
}

#[then("the server was polled {count:usize} times")]
fn polled_times(polling_context: &PollingContext, count: usize) -> Result<(), StepError> {
    let polls = polling_context
        .transport
        .calls()
        .iter()
        .filter(|call| call.command == "queryAsyncJobResult")
        .count();
    if polls == count {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {count} polls, got {polls}"
        )))
    }
}
