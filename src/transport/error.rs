//! Error types for the HTTP transport.

use thiserror::Error;

/// Errors raised while sending a command to the management server.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TransportError {
    /// The connection to the endpoint could not be established.
    #[error("failed to connect to {endpoint}: {message}")]
    Connect {
        /// Endpoint being contacted.
        endpoint: String,
        /// Message reported by the HTTP client.
        message: String,
    },
    /// The request did not complete within the HTTP timeout.
    #[error("request to {endpoint} timed out")]
    Timeout {
        /// Endpoint being contacted.
        endpoint: String,
    },
    /// Any other failure while sending the request or reading the body.
    #[error("request failed: {message}")]
    Request {
        /// Message reported by the HTTP client.
        message: String,
    },
    /// The server answered with a non-success status and no API error body.
    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },
    /// The server rejected the command with a CloudStack error body.
    #[error("CloudStack API error {code} (HTTP {status}): {text}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// CloudStack `errorcode`.
        code: i64,
        /// CloudStack `errortext`.
        text: String,
    },
}

impl TransportError {
    /// Reports whether retrying the same request may succeed.
    ///
    /// Network failures and server-side statuses without a CloudStack error
    /// body are transient; API rejections and client errors are not.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Connect { .. } | Self::Timeout { .. } | Self::Request { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Api { .. } => false,
        }
    }

    pub(crate) fn from_reqwest(endpoint: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout {
                endpoint: endpoint.to_owned(),
            };
        }
        if err.is_connect() {
            return Self::Connect {
                endpoint: endpoint.to_owned(),
                message: err.to_string(),
            };
        }
        Self::Request {
            message: err.to_string(),
        }
    }
}
