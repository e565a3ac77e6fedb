//! Firewall service: ingress firewall and port forwarding rules.

use serde::Deserialize;

use super::{SuccessResponse, Tag};
use crate::command::{Command, async_response, sync_response};
use crate::reshape::ResultShape;
use crate::transport::CommandParams;

/// Port fields of firewall rules that some API versions emit as strings.
pub const FIREWALL_PORT_FIELDS: &[&str] = &["startport", "endport"];

/// Port fields of port forwarding rules that some API versions emit as
/// strings.
pub const PORT_FORWARDING_PORT_FIELDS: &[&str] =
    &["privateport", "privateendport", "publicport", "publicendport"];

/// Ingress firewall rule.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct FirewallRule {
    /// Rule identifier.
    pub id: String,
    /// Protocol (`tcp`, `udp`, `icmp` or a protocol number).
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
    /// Network the rule belongs to.
    #[serde(rename = "networkid")]
    pub network_id: String,
    /// Comma-separated source CIDRs.
    #[serde(rename = "cidrlist")]
    pub cidr_list: String,
    /// ICMP type for ICMP rules.
    #[serde(rename = "icmptype")]
    pub icmp_type: Option<i64>,
    /// ICMP code for ICMP rules.
    #[serde(rename = "icmpcode")]
    pub icmp_code: Option<i64>,
    /// Rule state.
    pub state: String,
    /// Whether the rule is shown to end users.
    #[serde(rename = "fordisplay")]
    pub for_display: bool,
    /// Resource tags.
    pub tags: Vec<Tag>,
}

/// Port forwarding rule.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct PortForwardingRule {
    /// Rule identifier.
    pub id: String,
    /// Protocol (`tcp` or `udp`).
    pub protocol: String,
    /// First private port.
    #[serde(rename = "privateport")]
    pub private_port: Option<u16>,
    /// Last private port.
    #[serde(rename = "privateendport")]
    pub private_end_port: Option<u16>,
    /// First public port.
    #[serde(rename = "publicport")]
    pub public_port: Option<u16>,
    /// Last public port.
    #[serde(rename = "publicendport")]
    pub public_end_port: Option<u16>,
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
    /// Network the rule belongs to.
    #[serde(rename = "networkid")]
    pub network_id: String,
    /// Comma-separated source CIDRs.
    #[serde(rename = "cidrlist")]
    pub cidr_list: String,
    /// Rule state.
    pub state: String,
    /// Whether the rule is shown to end users.
    #[serde(rename = "fordisplay")]
    pub for_display: bool,
    /// Resource tags.
    pub tags: Vec<Tag>,
}

/// Parameters for `createFirewallRule`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CreateFirewallRule {
    /// Public IP address the rule applies to.
    pub ip_address_id: String,
    /// Protocol (`tcp`, `udp`, `icmp` or a protocol number).
    pub protocol: String,
    /// First port of the range.
    pub start_port: Option<u16>,
    /// Last port of the range.
    pub end_port: Option<u16>,
    /// Source CIDRs.
    pub cidr_list: Vec<String>,
    /// ICMP type for ICMP rules.
    pub icmp_type: Option<i64>,
    /// ICMP code for ICMP rules.
    pub icmp_code: Option<i64>,
    /// Whether the rule is shown to end users.
    pub for_display: Option<bool>,
}

impl CreateFirewallRule {
    /// Creates a rule for `ip_address_id` and `protocol`.
    #[must_use]
    pub fn new(ip_address_id: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            ip_address_id: ip_address_id.into(),
            protocol: protocol.into(),
            ..Self::default()
        }
    }

    /// Sets the port range.
    #[must_use]
    pub const fn ports(mut self, start: u16, end: u16) -> Self {
        self.start_port = Some(start);
        self.end_port = Some(end);
        self
    }

    /// Sets the source CIDRs.
    #[must_use]
    pub fn cidr_list<S: Into<String>>(mut self, cidrs: impl IntoIterator<Item = S>) -> Self {
        self.cidr_list = cidrs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the ICMP type and code.
    #[must_use]
    pub const fn icmp(mut self, icmp_type: i64, icmp_code: i64) -> Self {
        self.icmp_type = Some(icmp_type);
        self.icmp_code = Some(icmp_code);
        self
    }

    /// Sets display visibility.
    #[must_use]
    pub const fn for_display(mut self, value: bool) -> Self {
        self.for_display = Some(value);
        self
    }
}

impl Command for CreateFirewallRule {
    const NAME: &'static str = "createFirewallRule";
    const ASYNC: bool = true;
    const SHAPE: ResultShape = ResultShape::Nested;
    const NUMERIC_FIELDS: &'static [&'static str] = FIREWALL_PORT_FIELDS;
    type Response = CreateFirewallRuleResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set("ipaddressid", self.ip_address_id.clone());
        params.set("protocol", self.protocol.clone());
        params.set_opt("startport", self.start_port);
        params.set_opt("endport", self.end_port);
        params.set_list("cidrlist", &self.cidr_list);
        params.set_int("icmptype", self.icmp_type);
        params.set_int("icmpcode", self.icmp_code);
        params.set_bool("fordisplay", self.for_display);
        params
    }
}

/// Response of `createFirewallRule`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct CreateFirewallRuleResponse {
    /// Job that created the rule.
    #[serde(rename = "jobid", default)]
    pub job_id: String,
    /// Status of that job.
    #[serde(rename = "jobstatus", default)]
    pub job_status: i64,
    /// The created rule.
    #[serde(flatten)]
    pub rule: FirewallRule,
}

/// Parameters for `deleteFirewallRule`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeleteFirewallRule {
    /// Rule to delete.
    pub id: String,
}

impl DeleteFirewallRule {
    /// Creates a deletion request for rule `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Command for DeleteFirewallRule {
    const NAME: &'static str = "deleteFirewallRule";
    const ASYNC: bool = true;
    type Response = SuccessResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set("id", self.id.clone());
        params
    }
}

/// Parameters for `listFirewallRules`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListFirewallRules {
    /// Restrict to one rule.
    pub id: Option<String>,
    /// Restrict to rules of one public IP.
    pub ip_address_id: Option<String>,
    /// Restrict to rules of one network.
    pub network_id: Option<String>,
    /// Free-text filter.
    pub keyword: Option<String>,
    /// Page number.
    pub page: Option<i64>,
    /// Page size.
    pub page_size: Option<i64>,
}

impl ListFirewallRules {
    /// Creates an unfiltered listing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to one rule.
    #[must_use]
    pub fn id(mut self, value: impl Into<String>) -> Self {
        self.id = Some(value.into());
        self
    }

    /// Restricts the listing to one public IP.
    #[must_use]
    pub fn ip_address_id(mut self, value: impl Into<String>) -> Self {
        self.ip_address_id = Some(value.into());
        self
    }

    /// Restricts the listing to one network.
    #[must_use]
    pub fn network_id(mut self, value: impl Into<String>) -> Self {
        self.network_id = Some(value.into());
        self
    }

    /// Sets the keyword filter.
    #[must_use]
    pub fn keyword(mut self, value: impl Into<String>) -> Self {
        self.keyword = Some(value.into());
        self
    }

    /// Sets the page number and size.
    #[must_use]
    pub fn page(mut self, page: i64, page_size: i64) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }
}

impl Command for ListFirewallRules {
    const NAME: &'static str = "listFirewallRules";
    const NUMERIC_FIELDS: &'static [&'static str] = FIREWALL_PORT_FIELDS;
    type Response = ListFirewallRulesResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set_opt("id", self.id.as_deref());
        params.set_opt("ipaddressid", self.ip_address_id.as_deref());
        params.set_opt("networkid", self.network_id.as_deref());
        params.set_opt("keyword", self.keyword.as_deref());
        params.set_int("page", self.page);
        params.set_int("pagesize", self.page_size);
        params
    }
}

/// Response of `listFirewallRules`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ListFirewallRulesResponse {
    /// Total number of matching rules.
    pub count: i64,
    /// Rules on this page.
    #[serde(rename = "firewallrule")]
    pub firewall_rules: Vec<FirewallRule>,
}

/// Parameters for `createPortForwardingRule`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CreatePortForwardingRule {
    /// Public IP address the rule applies to.
    pub ip_address_id: String,
    /// Protocol (`tcp` or `udp`).
    pub protocol: String,
    /// First private port.
    pub private_port: u16,
    /// First public port.
    pub public_port: u16,
    /// Target virtual machine.
    pub virtual_machine_id: String,
    /// Last private port.
    pub private_end_port: Option<u16>,
    /// Last public port.
    pub public_end_port: Option<u16>,
    /// Network of the target virtual machine.
    pub network_id: Option<String>,
    /// Guest IP of the target virtual machine.
    pub vm_guest_ip: Option<String>,
    /// Create a matching firewall rule.
    pub open_firewall: Option<bool>,
    /// Source CIDRs.
    pub cidr_list: Vec<String>,
    /// Whether the rule is shown to end users.
    pub for_display: Option<bool>,
}

impl CreatePortForwardingRule {
    /// Creates a rule forwarding `public_port` on `ip_address_id` to
    /// `private_port` on `virtual_machine_id`.
    #[must_use]
    pub fn new(
        ip_address_id: impl Into<String>,
        protocol: impl Into<String>,
        private_port: u16,
        public_port: u16,
        virtual_machine_id: impl Into<String>,
    ) -> Self {
        Self {
            ip_address_id: ip_address_id.into(),
            protocol: protocol.into(),
            private_port,
            public_port,
            virtual_machine_id: virtual_machine_id.into(),
            ..Self::default()
        }
    }

    /// Sets the last private and public ports of the ranges.
    #[must_use]
    pub const fn end_ports(mut self, private_end: u16, public_end: u16) -> Self {
        self.private_end_port = Some(private_end);
        self.public_end_port = Some(public_end);
        self
    }

    /// Sets the network of the target virtual machine.
    #[must_use]
    pub fn network_id(mut self, value: impl Into<String>) -> Self {
        self.network_id = Some(value.into());
        self
    }

    /// Sets the guest IP of the target virtual machine.
    #[must_use]
    pub fn vm_guest_ip(mut self, value: impl Into<String>) -> Self {
        self.vm_guest_ip = Some(value.into());
        self
    }

    /// Requests a matching firewall rule.
    #[must_use]
    pub const fn open_firewall(mut self, value: bool) -> Self {
        self.open_firewall = Some(value);
        self
    }

    /// Sets the source CIDRs.
    #[must_use]
    pub fn cidr_list<S: Into<String>>(mut self, cidrs: impl IntoIterator<Item = S>) -> Self {
        self.cidr_list = cidrs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets display visibility.
    #[must_use]
    pub const fn for_display(mut self, value: bool) -> Self {
        self.for_display = Some(value);
        self
    }
}

impl Command for CreatePortForwardingRule {
    const NAME: &'static str = "createPortForwardingRule";
    const ASYNC: bool = true;
    const SHAPE: ResultShape = ResultShape::Nested;
    const NUMERIC_FIELDS: &'static [&'static str] = PORT_FORWARDING_PORT_FIELDS;
    type Response = CreatePortForwardingRuleResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set("ipaddressid", self.ip_address_id.clone());
        params.set("protocol", self.protocol.clone());
        params.set("privateport", self.private_port.to_string());
        params.set("publicport", self.public_port.to_string());
        params.set("virtualmachineid", self.virtual_machine_id.clone());
        params.set_opt("privateendport", self.private_end_port);
        params.set_opt("publicendport", self.public_end_port);
        params.set_opt("networkid", self.network_id.as_deref());
        params.set_opt("vmguestip", self.vm_guest_ip.as_deref());
        params.set_bool("openfirewall", self.open_firewall);
        params.set_list("cidrlist", &self.cidr_list);
        params.set_bool("fordisplay", self.for_display);
        params
    }
}

/// Response of `createPortForwardingRule`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct CreatePortForwardingRuleResponse {
    /// Job that created the rule.
    #[serde(rename = "jobid", default)]
    pub job_id: String,
    /// Status of that job.
    #[serde(rename = "jobstatus", default)]
    pub job_status: i64,
    /// The created rule.
    #[serde(flatten)]
    pub rule: PortForwardingRule,
}

/// Parameters for `listPortForwardingRules`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListPortForwardingRules {
    /// Restrict to one rule.
    pub id: Option<String>,
    /// Restrict to rules of one public IP.
    pub ip_address_id: Option<String>,
    /// Restrict to rules of one network.
    pub network_id: Option<String>,
    /// Free-text filter.
    pub keyword: Option<String>,
    /// Page number.
    pub page: Option<i64>,
    /// Page size.
    pub page_size: Option<i64>,
}

impl ListPortForwardingRules {
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

    /// Sets the page number and size.
    #[must_use]
    pub fn page(mut self, page: i64, page_size: i64) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }
}

impl Command for ListPortForwardingRules {
    const NAME: &'static str = "listPortForwardingRules";
    const NUMERIC_FIELDS: &'static [&'static str] = PORT_FORWARDING_PORT_FIELDS;
    type Response = ListPortForwardingRulesResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set_opt("id", self.id.as_deref());
        params.set_opt("ipaddressid", self.ip_address_id.as_deref());
        params.set_opt("networkid", self.network_id.as_deref());
        params.set_opt("keyword", self.keyword.as_deref());
        params.set_int("page", self.page);
        params.set_int("pagesize", self.page_size);
        params
    }
}

/// Response of `listPortForwardingRules`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ListPortForwardingRulesResponse {
    /// Total number of matching rules.
    pub count: i64,
    /// Rules on this page.
    #[serde(rename = "portforwardingrule")]
    pub port_forwarding_rules: Vec<PortForwardingRule>,
}

async_response!(CreateFirewallRuleResponse, CreatePortForwardingRuleResponse);
sync_response!(ListFirewallRulesResponse, ListPortForwardingRulesResponse);
