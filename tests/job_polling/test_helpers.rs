//! Shared fixtures and helpers for job polling scenarios.

use std::time::Duration;

use cloudstack::services::firewall::CreateFirewallRuleResponse;
use cloudstack::test_support::ScriptedTransport;
use cloudstack::{ClientOptions, CloudStackError, CommandError, PollPolicy};
use rstest::fixture;

/// Poll cadence used by every scenario.
pub const INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Debug)]
pub enum PollingOutcome {
    Completed(CreateFirewallRuleResponse),
    TimedOut(Box<CreateFirewallRuleResponse>),
    Failed(CloudStackError),
}

impl PollingOutcome {
    pub fn from_result(
        result: Result<CreateFirewallRuleResponse, CommandError<CreateFirewallRuleResponse>>,
    ) -> Self {
        match result {
            Ok(response) => Self::Completed(response),
            Err(CommandError::Timeout { partial, .. }) => Self::TimedOut(partial),
            Err(CommandError::Failed(err)) => Self::Failed(err),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PollingContext {
    pub transport: ScriptedTransport,
    pub options: ClientOptions,
    pub job_id: String,
    pub outcome: Option<PollingOutcome>,
    pub elapsed: Duration,
}

#[fixture]
pub fn polling_context() -> PollingContext {
    PollingContext {
        transport: ScriptedTransport::new(),
        options: ClientOptions {
            async_mode: true,
            timeout: Some(Duration::from_secs(60)),
            poll: PollPolicy {
                interval: INTERVAL,
                transport_attempts: 3,
                transport_retry_delay: Duration::from_millis(500),
            },
        },
        job_id: String::new(),
        outcome: None,
        elapsed: Duration::ZERO,
    }
}
