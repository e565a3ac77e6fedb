//! Parameter builders and response types for CloudStack API commands.
//!
//! Each submodule covers one API service. Builders take required arguments
//! in `new` and expose chainable setters for optional ones; their public
//! fields double as getters. Every builder implements
//! [`crate::command::Command`], which the client uses to encode the request
//! and decode the response.

pub mod address;
pub mod asyncjob;
pub mod firewall;
pub mod iso;
pub mod nat;
pub mod webhook;

use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::command::async_response;

/// Resource tag attached to many CloudStack objects.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Tag {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
    /// Type of the tagged resource.
    #[serde(rename = "resourcetype")]
    pub resource_type: String,
    /// Identifier of the tagged resource.
    #[serde(rename = "resourceid")]
    pub resource_id: String,
}

/// Generic success record returned by delete/disable style commands.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct SuccessResponse {
    /// Job that produced the record, for asynchronous commands.
    #[serde(rename = "jobid")]
    pub job_id: String,
    /// Status of that job.
    #[serde(rename = "jobstatus")]
    pub job_status: i64,
    /// Whether the operation succeeded.
    #[serde(deserialize_with = "bool_or_string")]
    pub success: bool,
    /// Optional server message.
    #[serde(rename = "displaytext")]
    pub display_text: String,
}

async_response!(SuccessResponse);

/// Synchronous commands report `success` as the string `"true"` while jobs
/// report a JSON boolean.
fn bool_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Text(text) => text
            .trim()
            .parse::<bool>()
            .map_err(|_| de::Error::invalid_value(de::Unexpected::Str(&text), &"true or false")),
    }
}

#[cfg(test)]
mod tests;
