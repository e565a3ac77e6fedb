//! `reqwest`-backed transport for the CloudStack management server.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use super::{CommandParams, Transport, TransportError, TransportFuture};
use crate::config::{CloudStackConfig, ConfigError};

const BODY_PREVIEW_LIMIT: usize = 512;

/// Transport that POSTs commands as form data to the API endpoint.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the endpoint does not parse as a
    /// URL or the HTTP client cannot be initialised.
    pub fn new(
        endpoint: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let url = Url::parse(endpoint.trim())
            .map_err(|err| ConfigError::Invalid(format!("api_url {endpoint}: {err}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ConfigError::Invalid(format!("http client: {err}")))?;
        Ok(Self {
            client,
            endpoint: url,
            api_key,
            timeout,
        })
    }

    /// Creates a transport from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails.
    pub fn from_config(config: &CloudStackConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(
            &config.api_url,
            config.api_key.clone(),
            config.http_timeout(),
        )
    }

    fn form(&self, command: &str, params: &CommandParams) -> CommandParams {
        let mut form = params.clone();
        form.set("command", command);
        form.set("response", "json");
        if let Some(key) = &self.api_key {
            form.set("apiKey", key.clone());
        }
        form
    }

    async fn send(&self, command: &str, params: &CommandParams) -> Result<Vec<u8>, TransportError> {
        let endpoint = self.endpoint.as_str();
        debug!(command, endpoint, "invoking CloudStack command");

        let response = self
            .client
            .post(self.endpoint.clone())
            .form(self.form(command, params).as_map())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| TransportError::from_reqwest(endpoint, &err))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| TransportError::from_reqwest(endpoint, &err))?;

        if status.is_success() {
            return Ok(body.to_vec());
        }
        Err(classify_failure(status.as_u16(), &body))
    }
}

impl Transport for HttpTransport {
    fn invoke<'a>(&'a self, command: &'a str, params: &'a CommandParams) -> TransportFuture<'a> {
        Box::pin(self.send(command, params))
    }
}

/// Maps a non-success response onto a [`TransportError`], preferring the
/// CloudStack `errorcode`/`errortext` pair when the body carries one.
fn classify_failure(status: u16, body: &[u8]) -> TransportError {
    let api_error = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| api_error_fields(&value));

    match api_error {
        Some((code, text)) => TransportError::Api { status, code, text },
        None => {
            let preview = String::from_utf8_lossy(body);
            TransportError::Status {
                status,
                body: preview.chars().take(BODY_PREVIEW_LIMIT).collect(),
            }
        }
    }
}

/// Error bodies are wrapped in a `<command>response` or `errorresponse`
/// envelope holding `errorcode` and `errortext`.
fn api_error_fields(value: &Value) -> Option<(i64, String)> {
    let envelope = value.as_object()?.values().next()?;
    let code = envelope.get("errorcode")?.as_i64()?;
    let text = envelope
        .get("errortext")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    Some((code, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_body_is_classified_as_api_error() {
        let body = br#"{"queryasyncjobresultresponse":{"uuidList":[],"errorcode":431,"cserrorcode":9999,"errortext":"Unable to execute API command"}}"#;
        let error = classify_failure(431, body);
        assert_eq!(
            error,
            TransportError::Api {
                status: 431,
                code: 431,
                text: String::from("Unable to execute API command"),
            }
        );
        assert!(!error.is_transient());
    }

    #[test]
    fn gateway_failure_without_api_body_is_transient() {
        let error = classify_failure(502, b"<html>Bad Gateway</html>");
        assert!(
            matches!(error, TransportError::Status { status: 502, ref body } if body.contains("Bad Gateway"))
        );
        assert!(error.is_transient());
    }

    #[test]
    fn form_adds_command_response_and_api_key() {
        let transport = HttpTransport::new(
            "https://cloud.example.com/client/api",
            Some(String::from("key")),
            Duration::from_secs(5),
        )
        .unwrap_or_else(|err| panic!("transport should build: {err}"));
        let mut params = CommandParams::new();
        params.set("jobid", "abc");

        let form = transport.form("queryAsyncJobResult", &params);
        assert_eq!(form.get("command"), Some("queryAsyncJobResult"));
        assert_eq!(form.get("response"), Some("json"));
        assert_eq!(form.get("apiKey"), Some("key"));
        assert_eq!(form.get("jobid"), Some("abc"));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let result = HttpTransport::new("not a url", None, Duration::from_secs(5));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
