//! Unit tests for the async job poller.

use std::time::Duration;

use rstest::{fixture, rstest};
use serde_json::json;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

use super::*;
use crate::test_support::ScriptedTransport;
use crate::transport::TransportError;

const INTERVAL: Duration = Duration::from_secs(1);
const RETRY_DELAY: Duration = Duration::from_millis(500);

#[fixture]
fn policy() -> PollPolicy {
    PollPolicy {
        interval: INTERVAL,
        transport_attempts: 3,
        transport_retry_delay: RETRY_DELAY,
    }
}

#[rstest]
#[case::pending(0, JobStatus::Pending)]
#[case::succeeded(1, JobStatus::Succeeded)]
#[case::failed(2, JobStatus::Failed(2))]
#[case::unknown(7, JobStatus::Failed(7))]
fn status_codes_map_onto_lifecycle(#[case] code: i64, #[case] expected: JobStatus) {
    assert_eq!(JobStatus::from_code(code), expected);
    assert_eq!(expected.is_terminal(), code != 0);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn returns_result_after_two_pending_polls(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    transport.push_pending("abc");
    transport.push_pending("abc");
    transport.push_succeeded(
        "abc",
        json!({"thing": {"startport": "80", "endport": "8080"}}),
    );

    let started = Instant::now();
    let completed = JobPoller::new(&transport, &policy)
        .wait("abc", Some(Duration::from_secs(60)))
        .await
        .unwrap_or_else(|err| panic!("job should complete: {err}"));

    assert_eq!(started.elapsed(), INTERVAL * 2);
    assert_eq!(completed.job_id, "abc");
    assert_eq!(completed.result_type, "object");
    assert_eq!(
        completed.result,
        json!({"thing": {"startport": "80", "endport": "8080"}})
    );

    let calls = transport.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|call| call.command == "queryAsyncJobResult"
        && call.params.get("jobid") == Some("abc")));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn failed_job_is_reported_without_sleeping(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    transport.push_json(&crate::test_support::job_response(
        "abc",
        json!({"jobstatus": 2, "jobresultcode": 530}),
    ));

    let started = Instant::now();
    let err = JobPoller::new(&transport, &policy)
        .wait("abc", Some(Duration::from_secs(60)))
        .await
        .expect_err("job should fail");

    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(
        err,
        JobError::Failed(JobFailedError {
            job_id: String::from("abc"),
            status: 2,
            result_code: 530,
            error_code: None,
            error_text: None,
        })
    );
    assert_eq!(transport.calls().len(), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn failed_job_carries_error_text(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    transport.push_failed("abc", 530, "Failed to create firewall rule");

    let err = JobPoller::new(&transport, &policy)
        .wait("abc", None)
        .await
        .expect_err("job should fail");

    let JobError::Failed(failure) = err else {
        panic!("expected job failure, got {err:?}");
    };
    assert_eq!(failure.error_code, Some(530));
    assert_eq!(
        failure.error_text.as_deref(),
        Some("Failed to create firewall rule")
    );
    assert!(failure.to_string().contains("Failed to create firewall rule"));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn unknown_terminal_status_counts_as_failure(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    transport.push_json(&crate::test_support::job_response(
        "abc",
        json!({"jobstatus": 3}),
    ));

    let err = JobPoller::new(&transport, &policy)
        .wait("abc", None)
        .await
        .expect_err("job should fail");
    assert!(matches!(err, JobError::Failed(JobFailedError { status: 3, .. })));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn budget_of_one_interval_times_out_after_one_interval(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    for _ in 0..5 {
        transport.push_pending("abc");
    }

    let started = Instant::now();
    let err = JobPoller::new(&transport, &policy)
        .wait("abc", Some(INTERVAL))
        .await
        .expect_err("job should time out");

    assert_eq!(started.elapsed(), INTERVAL);
    assert_eq!(
        err,
        JobError::Timeout(AsyncTimeoutError {
            job_id: String::from("abc"),
            elapsed: INTERVAL,
        })
    );
    assert_eq!(transport.calls().len(), 2);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn timeout_never_overshoots_budget_by_more_than_one_interval(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    for _ in 0..10 {
        transport.push_pending("abc");
    }
    let budget = Duration::from_millis(2500);

    let started = Instant::now();
    let err = JobPoller::new(&transport, &policy)
        .wait("abc", Some(budget))
        .await
        .expect_err("job should time out");

    let elapsed = started.elapsed();
    assert!(matches!(err, JobError::Timeout(_)));
    assert!(elapsed >= budget, "elapsed {elapsed:?} below budget");
    assert!(elapsed <= budget + INTERVAL, "elapsed {elapsed:?} overshoots");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn missing_budget_polls_until_terminal(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    for _ in 0..6 {
        transport.push_pending("abc");
    }
    transport.push_succeeded("abc", json!({"success": true}));

    let started = Instant::now();
    let completed = JobPoller::new(&transport, &policy)
        .wait("abc", None)
        .await
        .unwrap_or_else(|err| panic!("job should complete: {err}"));

    assert_eq!(started.elapsed(), INTERVAL * 6);
    assert_eq!(completed.result, json!({"success": true}));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn transient_transport_errors_are_retried(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    transport.push_connection_refused();
    transport.push_connection_refused();
    transport.push_succeeded("abc", json!({"thing": {}}));

    let started = Instant::now();
    let completed = JobPoller::new(&transport, &policy)
        .wait("abc", Some(Duration::from_secs(60)))
        .await
        .unwrap_or_else(|err| panic!("retries should recover: {err}"));

    assert_eq!(started.elapsed(), RETRY_DELAY * 2);
    assert_eq!(completed.result, json!({"thing": {}}));
    assert_eq!(transport.calls().len(), 3);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn transport_errors_beyond_attempt_bound_propagate(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    for _ in 0..3 {
        transport.push_connection_refused();
    }
    transport.push_succeeded("abc", json!({}));

    let err = JobPoller::new(&transport, &policy)
        .wait("abc", None)
        .await
        .expect_err("third failure should propagate");

    assert!(
        matches!(err, JobError::Transport { ref source, .. } if matches!(source, TransportError::Connect { .. })),
        "unexpected error: {err:?}"
    );
    assert_eq!(transport.remaining(), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn api_rejections_are_not_retried(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    transport.push_error(TransportError::Api {
        status: 431,
        code: 431,
        text: String::from("Unable to find job"),
    });

    let err = JobPoller::new(&transport, &policy)
        .wait("missing", None)
        .await
        .expect_err("api error should propagate");
    assert!(matches!(err, JobError::Transport { .. }));
    assert_eq!(transport.calls().len(), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn unreadable_status_is_a_decode_error(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    transport.push_body("<html>maintenance</html>");

    let err = JobPoller::new(&transport, &policy)
        .wait("abc", None)
        .await
        .expect_err("decode should fail");
    assert!(matches!(err, JobError::Decode { .. }));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn empty_job_id_is_rejected_before_polling(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    let err = JobPoller::new(&transport, &policy)
        .wait("  ", None)
        .await
        .expect_err("empty id");
    assert_eq!(err, JobError::MissingJobId);
    assert!(transport.calls().is_empty());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn cancellation_interrupts_sleep(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    for _ in 0..10 {
        transport.push_pending("abc");
    }
    let token = CancellationToken::new();
    let poller = JobPoller::new(&transport, &policy).with_cancellation(token.clone());

    let started = Instant::now();
    let (result, ()) = tokio::join!(poller.wait("abc", None), async {
        sleep(Duration::from_millis(2500)).await;
        token.cancel();
    });

    assert_eq!(
        result,
        Err(JobError::Cancelled {
            job_id: String::from("abc"),
        })
    );
    assert_eq!(started.elapsed(), Duration::from_millis(2500));
    assert_eq!(transport.calls().len(), 3);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn cancelled_token_stops_before_first_poll(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    let token = CancellationToken::new();
    token.cancel();

    let err = JobPoller::new(&transport, &policy)
        .with_cancellation(token)
        .wait("abc", None)
        .await
        .expect_err("cancelled");
    assert!(matches!(err, JobError::Cancelled { .. }));
    assert!(transport.calls().is_empty());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn concurrent_waits_keep_independent_budgets(policy: PollPolicy) {
    let fast = ScriptedTransport::new();
    fast.push_succeeded("fast", json!({"id": "fast"}));
    let slow = ScriptedTransport::new();
    for _ in 0..5 {
        slow.push_pending("slow");
    }

    let fast_poller = JobPoller::new(&fast, &policy);
    let slow_poller = JobPoller::new(&slow, &policy);
    let (fast_result, slow_result) = tokio::join!(
        fast_poller.wait("fast", Some(INTERVAL)),
        slow_poller.wait("slow", Some(INTERVAL * 2)),
    );

    assert!(fast_result.is_ok());
    assert!(matches!(slow_result, Err(JobError::Timeout(ref timeout)) if timeout.job_id == "slow"));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn unrepresentable_budget_polls_without_deadline(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    transport.push_pending("abc");
    transport.push_succeeded("abc", json!({"id": "abc"}));

    let completed = JobPoller::new(&transport, &policy)
        .wait("abc", Some(Duration::MAX))
        .await
        .unwrap_or_else(|err| panic!("huge budget should still complete: {err}"));

    assert_eq!(completed.result, json!({"id": "abc"}));
    assert_eq!(transport.calls().len(), 2);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn retry_delays_are_clipped_to_budget(policy: PollPolicy) {
    let transport = ScriptedTransport::new();
    transport.push_pending("abc");
    for _ in 0..3 {
        transport.push_connection_refused();
    }
    let budget = INTERVAL + Duration::from_millis(200);

    let started = Instant::now();
    let err = JobPoller::new(&transport, &policy)
        .wait("abc", Some(budget))
        .await
        .expect_err("budget should run out during retries");

    assert_eq!(started.elapsed(), budget);
    assert_eq!(
        err,
        JobError::Timeout(AsyncTimeoutError {
            job_id: String::from("abc"),
            elapsed: budget,
        })
    );
    assert_eq!(transport.calls().len(), 3);
    assert_eq!(transport.remaining(), 1);
}
