//! Test support utilities shared across unit and integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{Value, json};

use crate::transport::{CommandParams, Transport, TransportError, TransportFuture};

/// Records a single invocation made through [`ScriptedTransport`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransportCall {
    /// API command name.
    pub command: String,
    /// Parameters passed with the command.
    pub params: CommandParams,
}

#[derive(Debug, Default)]
struct Script {
    responses: VecDeque<Result<Vec<u8>, TransportError>>,
    calls: Vec<TransportCall>,
}

/// Scripted transport that returns pre-seeded responses in FIFO order.
///
/// Clones share the same script, so a test can keep one handle for
/// assertions while the client owns another.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    /// Creates a transport with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues a raw response body.
    pub fn push_body(&self, body: impl Into<Vec<u8>>) {
        self.script().responses.push_back(Ok(body.into()));
    }

    /// Queues a JSON response body.
    pub fn push_json(&self, value: &Value) {
        self.push_body(value.to_string());
    }

    /// Queues a `queryAsyncJobResult` response for a pending job.
    pub fn push_pending(&self, job_id: &str) {
        self.push_json(&job_response(job_id, json!({"jobstatus": 0})));
    }

    /// Queues a `queryAsyncJobResult` response for a finished job.
    pub fn push_succeeded(&self, job_id: &str, result: Value) {
        self.push_json(&job_response(
            job_id,
            json!({"jobstatus": 1, "jobresultcode": 0, "jobresulttype": "object", "jobresult": result}),
        ));
    }

    /// Queues a `queryAsyncJobResult` response for a failed job.
    pub fn push_failed(&self, job_id: &str, result_code: i64, error_text: &str) {
        self.push_json(&job_response(
            job_id,
            json!({
                "jobstatus": 2,
                "jobresultcode": result_code,
                "jobresulttype": "object",
                "jobresult": {"errorcode": result_code, "errortext": error_text}
            }),
        ));
    }

    /// Queues a transport failure.
    pub fn push_error(&self, error: TransportError) {
        self.script().responses.push_back(Err(error));
    }

    /// Queues a connection-refused failure.
    pub fn push_connection_refused(&self) {
        self.push_error(TransportError::Connect {
            endpoint: String::from("http://127.0.0.1:8080/client/api"),
            message: String::from("connection refused"),
        });
    }

    /// Returns a snapshot of all invocations recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<TransportCall> {
        self.script().calls.clone()
    }

    /// Returns how many scripted responses have not been consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script().responses.len()
    }
}

impl Transport for ScriptedTransport {
    fn invoke<'a>(&'a self, command: &'a str, params: &'a CommandParams) -> TransportFuture<'a> {
        let next = {
            let mut script = self.script();
            script.calls.push(TransportCall {
                command: command.to_owned(),
                params: params.clone(),
            });
            script.responses.pop_front()
        };
        Box::pin(async move {
            next.unwrap_or_else(|| {
                Err(TransportError::Request {
                    message: format!("no scripted response available for {command}"),
                })
            })
        })
    }
}

/// Wraps `job` in a `queryasyncjobresultresponse` envelope, filling in the
/// job id.
#[must_use]
pub fn job_response(job_id: &str, mut job: Value) -> Value {
    if let Value::Object(map) = &mut job {
        map.insert(String::from("jobid"), Value::from(job_id));
    }
    json!({ "queryasyncjobresultresponse": job })
}
