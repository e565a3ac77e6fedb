//! Configuration loading via `ortho-config`.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::job::PollPolicy;

/// Smallest poll interval accepted from configuration.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(500);
/// Largest poll interval accepted from configuration.
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// CloudStack client configuration derived from environment variables,
/// configuration files, and CLI flags.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "CLOUDSTACK")]
pub struct CloudStackConfig {
    /// Management server API endpoint (for example
    /// `https://cloud.example.com/client/api`). This value is required.
    pub api_url: String,
    /// API key sent as the `apiKey` parameter. Request signing is handled
    /// outside this crate.
    pub api_key: Option<String>,
    /// Whether asynchronous commands block until their job completes.
    #[ortho_config(default = true)]
    pub async_mode: bool,
    /// Total polling budget per job in seconds. Zero or negative values
    /// disable the budget and poll until the job finishes.
    #[ortho_config(default = 300)]
    pub timeout_secs: i64,
    /// Delay between `queryAsyncJobResult` calls while a job is pending.
    #[ortho_config(default = 2000)]
    pub poll_interval_ms: u64,
    /// Attempts per poll before a transient transport error is surfaced.
    #[ortho_config(default = 3)]
    pub transport_retry_attempts: u32,
    /// Delay between transport retries in milliseconds.
    #[ortho_config(default = 500)]
    pub transport_retry_delay_ms: u64,
    /// Per-request HTTP timeout in seconds.
    #[ortho_config(default = 60)]
    pub http_timeout_secs: u64,
}

/// Immutable view of the settings the client and poller consume.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Block on job completion for asynchronous commands.
    pub async_mode: bool,
    /// Polling budget; `None` polls indefinitely.
    pub timeout: Option<Duration>,
    /// Poll cadence and transport retry policy.
    pub poll: PollPolicy,
}

impl ClientOptions {
    /// Converts a configured timeout in seconds into a polling budget,
    /// treating zero and negative values as "no budget".
    #[must_use]
    pub fn timeout_from_secs(secs: i64) -> Option<Duration> {
        u64::try_from(secs)
            .ok()
            .filter(|value| *value > 0)
            .map(Duration::from_secs)
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            async_mode: true,
            timeout: Some(Duration::from_secs(300)),
            poll: PollPolicy::default(),
        }
    }
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
}

impl FieldMetadata {
    const fn new(description: &'static str, env_var: &'static str, toml_key: &'static str) -> Self {
        Self {
            description,
            env_var,
            toml_key,
        }
    }

    fn hint(&self) -> String {
        format!(
            "set {} or add {} to [cloudstack] in cloudstack.toml",
            self.env_var, self.toml_key
        )
    }
}

const API_URL: FieldMetadata =
    FieldMetadata::new("management server API URL", "CLOUDSTACK_API_URL", "api_url");
const POLL_INTERVAL: FieldMetadata = FieldMetadata::new(
    "job poll interval",
    "CLOUDSTACK_POLL_INTERVAL_MS",
    "poll_interval_ms",
);
const RETRY_ATTEMPTS: FieldMetadata = FieldMetadata::new(
    "transport retry attempts",
    "CLOUDSTACK_TRANSPORT_RETRY_ATTEMPTS",
    "transport_retry_attempts",
);
const HTTP_TIMEOUT: FieldMetadata = FieldMetadata::new(
    "HTTP request timeout",
    "CLOUDSTACK_HTTP_TIMEOUT_SECS",
    "http_timeout_secs",
);

impl CloudStackConfig {
    fn invalid(metadata: &FieldMetadata, problem: &str) -> ConfigError {
        ConfigError::Invalid(format!(
            "{} {problem}: {}",
            metadata.description,
            metadata.hint()
        ))
    }

    /// Loads configuration using the `ortho-config` derive. Values merge
    /// defaults, configuration files, environment variables, and CLI flags in
    /// that order of precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the loader fails to merge sources.
    pub fn load_from_sources() -> Result<Self, ConfigError> {
        Self::load().map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads configuration without attempting to parse CLI arguments. Values
    /// still merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("cloudstack")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Performs semantic validation. Error messages include guidance on how
    /// to provide values via environment variables or configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when the API URL is empty and
    /// [`ConfigError::Invalid`] when a numeric setting is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "missing {}: {}",
                API_URL.description,
                API_URL.hint()
            )));
        }
        if reqwest::Url::parse(self.api_url.trim()).is_err() {
            return Err(Self::invalid(&API_URL, "is not a valid URL"));
        }

        let interval = Duration::from_millis(self.poll_interval_ms);
        if !(MIN_POLL_INTERVAL..=MAX_POLL_INTERVAL).contains(&interval) {
            return Err(Self::invalid(
                &POLL_INTERVAL,
                "must be between 500 and 5000 milliseconds",
            ));
        }
        if self.transport_retry_attempts == 0 {
            return Err(Self::invalid(&RETRY_ATTEMPTS, "must be at least 1"));
        }
        if self.http_timeout_secs == 0 {
            return Err(Self::invalid(&HTTP_TIMEOUT, "must be greater than zero"));
        }
        Ok(())
    }

    /// Builds the immutable [`ClientOptions`] after validating the config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails.
    pub fn client_options(&self) -> Result<ClientOptions, ConfigError> {
        self.validate()?;
        Ok(ClientOptions {
            async_mode: self.async_mode,
            timeout: ClientOptions::timeout_from_secs(self.timeout_secs),
            poll: PollPolicy {
                interval: Duration::from_millis(self.poll_interval_ms),
                transport_attempts: self.transport_retry_attempts,
                transport_retry_delay: Duration::from_millis(self.transport_retry_delay_ms),
            },
        })
    }

    /// Returns the per-request HTTP timeout.
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Indicates a configuration value is present but unusable.
    #[error("invalid configuration value: {0}")]
    Invalid(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
