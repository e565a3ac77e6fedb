//! NAT service: static NAT and IP forwarding rules.

use serde::Deserialize;

use super::SuccessResponse;
use super::firewall::FIREWALL_PORT_FIELDS;
use crate::command::{Command, async_response, sync_response};
use crate::reshape::ResultShape;
use crate::transport::CommandParams;

/// IP forwarding (static NAT) rule.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct IpForwardingRule {
    /// Rule identifier.
    pub id: String,
    /// Protocol (`tcp` or `udp`).
    pub protocol: String,
    /// First port of the range.
    #[serde(rename = "startport")]
    pub start_port: Option<u16>,
    /// Last port of the range.
    #[serde(rename = "endport")]
    pub end_port: Option<u16>,
    /// Public IP address the rule applies to.
    #[serde(rename = "ipaddressid")]
    pub ip_address_id: String,
    /// Public IP address value.
    #[serde(rename = "ipaddress")]
    pub ip_address: String,
    /// Target virtual machine.
    #[serde(rename = "virtualmachineid")]
    pub virtual_machine_id: String,
    /// Target virtual machine name.
    #[serde(rename = "virtualmachinename")]
    pub virtual_machine_name: String,
    /// Guest IP of the target virtual machine.
    #[serde(rename = "vmguestip")]
    pub vm_guest_ip: String,
    /// Rule state.
    pub state: String,
    /// Whether the rule is shown to end users.
    #[serde(rename = "fordisplay")]
    pub for_display: bool,
}

/// Parameters for `enableStaticNat`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EnableStaticNat {
    /// Public IP address to map.
    pub ip_address_id: String,
    /// Target virtual machine.
    pub virtual_machine_id: String,
    /// Network of the target virtual machine, required in VPCs.
    pub network_id: Option<String>,
    /// Guest IP of the target virtual machine.
    pub vm_guest_ip: Option<String>,
}

impl EnableStaticNat {
    /// Creates a request mapping `ip_address_id` to `virtual_machine_id`.
    #[must_use]
    pub fn new(ip_address_id: impl Into<String>, virtual_machine_id: impl Into<String>) -> Self {
        Self {
            ip_address_id: ip_address_id.into(),
            virtual_machine_id: virtual_machine_id.into(),
            ..Self::default()
        }
    }

    /// Sets the network.
    #[must_use]
    pub fn network_id(mut self, value: impl Into<String>) -> Self {
        self.network_id = Some(value.into());
        self
    }

    /// Sets the guest IP.
    #[must_use]
    pub fn vm_guest_ip(mut self, value: impl Into<String>) -> Self {
        self.vm_guest_ip = Some(value.into());
        self
    }
}

impl Command for EnableStaticNat {
    const NAME: &'static str = "enableStaticNat";
    type Response = SuccessResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set("ipaddressid", self.ip_address_id.clone());
        params.set("virtualmachineid", self.virtual_machine_id.clone());
        params.set_opt("networkid", self.network_id.as_deref());
        params.set_opt("vmguestip", self.vm_guest_ip.as_deref());
        params
    }
}

/// Parameters for `disableStaticNat`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisableStaticNat {
    /// Public IP address to unmap.
    pub ip_address_id: String,
}

impl DisableStaticNat {
    /// Creates a request removing static NAT from `ip_address_id`.
    #[must_use]
    pub fn new(ip_address_id: impl Into<String>) -> Self {
        Self {
            ip_address_id: ip_address_id.into(),
        }
    }
}

impl Command for DisableStaticNat {
    const NAME: &'static str = "disableStaticNat";
    const ASYNC: bool = true;
    type Response = SuccessResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set("ipaddressid", self.ip_address_id.clone());
        params
    }
}

/// Parameters for `createIpForwardingRule`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CreateIpForwardingRule {
    /// Public IP address the rule applies to.
    pub ip_address_id: String,
    /// Protocol (`tcp` or `udp`).
    pub protocol: String,
    /// First port of the range.
    pub start_port: u16,
    /// Last port of the range.
    pub end_port: Option<u16>,
    /// Source CIDRs.
    pub cidr_list: Vec<String>,
    /// Create a matching firewall rule.
    pub open_firewall: Option<bool>,
}

impl CreateIpForwardingRule {
    /// Creates a rule forwarding `start_port` on `ip_address_id`.
    #[must_use]
    pub fn new(ip_address_id: impl Into<String>, protocol: impl Into<String>, start_port: u16) -> Self {
        Self {
            ip_address_id: ip_address_id.into(),
            protocol: protocol.into(),
            start_port,
            ..Self::default()
        }
    }

    /// Sets the last port of the range.
    #[must_use]
    pub const fn end_port(mut self, value: u16) -> Self {
        self.end_port = Some(value);
        self
    }

    /// Sets the source CIDRs.
    #[must_use]
    pub fn cidr_list<S: Into<String>>(mut self, cidrs: impl IntoIterator<Item = S>) -> Self {
        self.cidr_list = cidrs.into_iter().map(Into::into).collect();
        self
    }

    /// Requests a matching firewall rule.
    #[must_use]
    pub const fn open_firewall(mut self, value: bool) -> Self {
        self.open_firewall = Some(value);
        self
    }
}

impl Command for CreateIpForwardingRule {
    const NAME: &'static str = "createIpForwardingRule";
    const ASYNC: bool = true;
    const SHAPE: ResultShape = ResultShape::Nested;
    const NUMERIC_FIELDS: &'static [&'static str] = FIREWALL_PORT_FIELDS;
    type Response = CreateIpForwardingRuleResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set("ipaddressid", self.ip_address_id.clone());
        params.set("protocol", self.protocol.clone());
        params.set("startport", self.start_port.to_string());
        params.set_opt("endport", self.end_port);
        params.set_list("cidrlist", &self.cidr_list);
        params.set_bool("openfirewall", self.open_firewall);
        params
    }
}

/// Response of `createIpForwardingRule`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct CreateIpForwardingRuleResponse {
    /// Job that created the rule.
    #[serde(rename = "jobid", default)]
    pub job_id: String,
    /// Status of that job.
    #[serde(rename = "jobstatus", default)]
    pub job_status: i64,
    /// The created rule.
    #[serde(flatten)]
    pub rule: IpForwardingRule,
}

/// Parameters for `listIpForwardingRules`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListIpForwardingRules {
    /// Restrict to one rule.
    pub id: Option<String>,
    /// Restrict to rules of one public IP.
    pub ip_address_id: Option<String>,
    /// Restrict to rules targeting one virtual machine.
    pub virtual_machine_id: Option<String>,
    /// Free-text filter.
    pub keyword: Option<String>,
    /// Page number.
    pub page: Option<i64>,
    /// Page size.
    pub page_size: Option<i64>,
}

impl ListIpForwardingRules {
    /// Creates an unfiltered listing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to one public IP.
    #[must_use]
    pub fn ip_address_id(mut self, value: impl Into<String>) -> Self {
        self.ip_address_id = Some(value.into());
        self
    }

    /// Restricts the listing to one virtual machine.
    #[must_use]
    pub fn virtual_machine_id(mut self, value: impl Into<String>) -> Self {
        self.virtual_machine_id = Some(value.into());
        self
    }
}

impl Command for ListIpForwardingRules {
    const NAME: &'static str = "listIpForwardingRules";
    const NUMERIC_FIELDS: &'static [&'static str] = FIREWALL_PORT_FIELDS;
    type Response = ListIpForwardingRulesResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set_opt("id", self.id.as_deref());
        params.set_opt("ipaddressid", self.ip_address_id.as_deref());
        params.set_opt("virtualmachineid", self.virtual_machine_id.as_deref());
        params.set_opt("keyword", self.keyword.as_deref());
        params.set_int("page", self.page);
        params.set_int("pagesize", self.page_size);
        params
    }
}

/// Response of `listIpForwardingRules`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ListIpForwardingRulesResponse {
    /// Total number of matching rules.
    pub count: i64,
    /// Rules on this page.
    #[serde(rename = "ipforwardingrule")]
    pub ip_forwarding_rules: Vec<IpForwardingRule>,
}

async_response!(CreateIpForwardingRuleResponse);
sync_response!(ListIpForwardingRulesResponse);
