//! Webhook service: event delivery endpoints.

use serde::Deserialize;

use super::SuccessResponse;
use crate::command::{Command, sync_response};
use crate::reshape::ResultShape;
use crate::transport::CommandParams;

/// Registered webhook.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Webhook {
    /// Webhook identifier.
    pub id: String,
    /// Webhook name.
    pub name: String,
    /// Description.
    pub description: String,
    /// URL receiving event payloads.
    #[serde(rename = "payloadurl")]
    pub payload_url: String,
    /// Secret used to sign deliveries.
    #[serde(rename = "secretkey")]
    pub secret_key: String,
    /// Whether TLS certificates of the payload URL are verified.
    #[serde(rename = "sslverification")]
    pub ssl_verification: bool,
    /// Scope (`Local`, `Domain` or `Global`).
    pub scope: String,
    /// State (`Enabled` or `Disabled`).
    pub state: String,
    /// Owning account.
    pub account: String,
    /// Owning domain.
    #[serde(rename = "domainid")]
    pub domain_id: String,
    /// Creation timestamp.
    pub created: String,
}

/// Parameters for `createWebhook`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CreateWebhook {
    /// Webhook name.
    pub name: String,
    /// URL receiving event payloads.
    pub payload_url: String,
    /// Description.
    pub description: Option<String>,
    /// Scope (`Local`, `Domain` or `Global`).
    pub scope: Option<String>,
    /// Secret used to sign deliveries.
    pub secret_key: Option<String>,
    /// Whether TLS certificates of the payload URL are verified.
    pub ssl_verification: Option<bool>,
    /// Initial state.
    pub state: Option<String>,
    /// Owning project.
    pub project_id: Option<String>,
}

impl CreateWebhook {
    /// Creates a webhook named `name` delivering to `payload_url`.
    #[must_use]
    pub fn new(name: impl Into<String>, payload_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload_url: payload_url.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    /// Sets the scope.
    #[must_use]
    pub fn scope(mut self, value: impl Into<String>) -> Self {
        self.scope = Some(value.into());
        self
    }

    /// Sets the signing secret.
    #[must_use]
    pub fn secret_key(mut self, value: impl Into<String>) -> Self {
        self.secret_key = Some(value.into());
        self
    }

    /// Enables or disables TLS verification.
    #[must_use]
    pub const fn ssl_verification(mut self, value: bool) -> Self {
        self.ssl_verification = Some(value);
        self
    }

    /// Sets the initial state.
    #[must_use]
    pub fn state(mut self, value: impl Into<String>) -> Self {
        self.state = Some(value.into());
        self
    }

    /// Sets the owning project.
    #[must_use]
    pub fn project_id(mut self, value: impl Into<String>) -> Self {
        self.project_id = Some(value.into());
        self
    }
}

impl Command for CreateWebhook {
    const NAME: &'static str = "createWebhook";
    const SHAPE: ResultShape = ResultShape::Nested;
    type Response = Webhook;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set("name", self.name.clone());
        params.set("payloadurl", self.payload_url.clone());
        params.set_opt("description", self.description.as_deref());
        params.set_opt("scope", self.scope.as_deref());
        params.set_opt("secretkey", self.secret_key.as_deref());
        params.set_bool("sslverification", self.ssl_verification);
        params.set_opt("state", self.state.as_deref());
        params.set_opt("projectid", self.project_id.as_deref());
        params
    }
}

/// Parameters for `deleteWebhook`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeleteWebhook {
    /// Webhook to delete.
    pub id: String,
}

impl DeleteWebhook {
    /// Creates a deletion request for webhook `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Command for DeleteWebhook {
    const NAME: &'static str = "deleteWebhook";
    type Response = SuccessResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set("id", self.id.clone());
        params
    }
}

/// Parameters for `listWebhooks`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListWebhooks {
    /// Restrict to one webhook.
    pub id: Option<String>,
    /// Restrict by name.
    pub name: Option<String>,
    /// Restrict by state.
    pub state: Option<String>,
    /// Restrict by scope.
    pub scope: Option<String>,
    /// Free-text filter.
    pub keyword: Option<String>,
    /// Page number.
    pub page: Option<i64>,
    /// Page size.
    pub page_size: Option<i64>,
}

impl ListWebhooks {
    /// Creates an unfiltered listing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing by name.
    #[must_use]
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    /// Restricts the listing by state.
    #[must_use]
    pub fn state(mut self, value: impl Into<String>) -> Self {
        self.state = Some(value.into());
        self
    }
}

impl Command for ListWebhooks {
    const NAME: &'static str = "listWebhooks";
    type Response = ListWebhooksResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set_opt("id", self.id.as_deref());
        params.set_opt("name", self.name.as_deref());
        params.set_opt("state", self.state.as_deref());
        params.set_opt("scope", self.scope.as_deref());
        params.set_opt("keyword", self.keyword.as_deref());
        params.set_int("page", self.page);
        params.set_int("pagesize", self.page_size);
        params
    }
}

/// Response of `listWebhooks`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ListWebhooksResponse {
    /// Total number of matching webhooks.
    pub count: i64,
    /// Webhooks on this page.
    #[serde(rename = "webhook")]
    pub webhooks: Vec<Webhook>,
}

sync_response!(Webhook, ListWebhooksResponse);
