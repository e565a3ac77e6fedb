//! BDD scenarios for async job completion.

use rstest_bdd_macros::scenario;

use super::test_helpers::{PollingContext, polling_context};

#[scenario(
    path = "tests/features/job_polling.feature",
    name = "Reshape a firewall rule after two pending polls"
)]
fn scenario_reshape_after_pending(polling_context: PollingContext) {
    let _ = polling_context;
}

#[scenario(
    path = "tests/features/job_polling.feature",
    name = "Surface a failed job without retrying"
)]
fn scenario_failed_job(polling_context: PollingContext) {
    let _ = polling_context;
}

#[scenario(
    path = "tests/features/job_polling.feature",
    name = "Time out after one poll interval"
)]
fn scenario_timeout(polling_context: PollingContext) {
    let _ = polling_context;
}

#[scenario(
    path = "tests/features/job_polling.feature",
    name = "Retry refused connections while polling"
)]
fn scenario_transport_retry(polling_context: PollingContext) {
    let _ = polling_context;
}
