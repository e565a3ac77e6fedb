//! Address service: public IP address allocation.

use serde::Deserialize;

use super::{SuccessResponse, Tag};
use crate::command::{Command, async_response, sync_response};
use crate::reshape::ResultShape;
use crate::transport::CommandParams;

/// Public IP address.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct IpAddress {
    /// Address identifier.
    pub id: String,
    /// Address value.
    #[serde(rename = "ipaddress")]
    pub ip_address: String,
    /// Allocation timestamp.
    pub allocated: String,
    /// Zone of the address.
    #[serde(rename = "zoneid")]
    pub zone_id: String,
    /// Zone name.
    #[serde(rename = "zonename")]
    pub zone_name: String,
    /// Whether this is the network's source NAT address.
    #[serde(rename = "issourcenat")]
    pub is_source_nat: bool,
    /// Whether static NAT is enabled on the address.
    #[serde(rename = "isstaticnat")]
    pub is_static_nat: bool,
    /// Whether the address can move across zones.
    #[serde(rename = "isportable")]
    pub is_portable: bool,
    /// Network the address is associated with.
    #[serde(rename = "associatednetworkid")]
    pub associated_network_id: String,
    /// VPC the address belongs to.
    #[serde(rename = "vpcid")]
    pub vpc_id: String,
    /// Virtual machine with static NAT to this address.
    #[serde(rename = "virtualmachineid")]
    pub virtual_machine_id: String,
    /// Address state.
    pub state: String,
    /// Whether the address is shown to end users.
    #[serde(rename = "fordisplay")]
    pub for_display: bool,
    /// Resource tags.
    pub tags: Vec<Tag>,
}

/// Parameters for `associateIpAddress`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AssociateIpAddress {
    /// Zone to allocate from.
    pub zone_id: Option<String>,
    /// Network to associate with.
    pub network_id: Option<String>,
    /// VPC to associate with.
    pub vpc_id: Option<String>,
    /// Specific address to acquire.
    pub ip_address: Option<String>,
    /// Allocate a portable address.
    pub is_portable: Option<bool>,
    /// Whether the address is shown to end users.
    pub for_display: Option<bool>,
}

impl AssociateIpAddress {
    /// Creates an allocation request; the server picks defaults for unset
    /// fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the zone.
    #[must_use]
    pub fn zone_id(mut self, value: impl Into<String>) -> Self {
        self.zone_id = Some(value.into());
        self
    }

    /// Sets the network.
    #[must_use]
    pub fn network_id(mut self, value: impl Into<String>) -> Self {
        self.network_id = Some(value.into());
        self
    }

    /// Sets the VPC.
    #[must_use]
    pub fn vpc_id(mut self, value: impl Into<String>) -> Self {
        self.vpc_id = Some(value.into());
        self
    }

    /// Requests a specific address.
    #[must_use]
    pub fn ip_address(mut self, value: impl Into<String>) -> Self {
        self.ip_address = Some(value.into());
        self
    }

    /// Requests a portable address.
    #[must_use]
    pub const fn is_portable(mut self, value: bool) -> Self {
        self.is_portable = Some(value);
        self
    }

    /// Sets display visibility.
    #[must_use]
    pub const fn for_display(mut self, value: bool) -> Self {
        self.for_display = Some(value);
        self
    }
}

impl Command for AssociateIpAddress {
    const NAME: &'static str = "associateIpAddress";
    const ASYNC: bool = true;
    const SHAPE: ResultShape = ResultShape::Nested;
    type Response = AssociateIpAddressResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set_opt("zoneid", self.zone_id.as_deref());
        params.set_opt("networkid", self.network_id.as_deref());
        params.set_opt("vpcid", self.vpc_id.as_deref());
        params.set_opt("ipaddress", self.ip_address.as_deref());
        params.set_bool("isportable", self.is_portable);
        params.set_bool("fordisplay", self.for_display);
        params
    }
}

/// Response of `associateIpAddress`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct AssociateIpAddressResponse {
    /// Job that allocated the address.
    #[serde(rename = "jobid", default)]
    pub job_id: String,
    /// Status of that job.
    #[serde(rename = "jobstatus", default)]
    pub job_status: i64,
    /// The allocated address.
    #[serde(flatten)]
    pub address: IpAddress,
}

/// Parameters for `disassociateIpAddress`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisassociateIpAddress {
    /// Address to release.
    pub id: String,
}

impl DisassociateIpAddress {
    /// Creates a release request for address `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Command for DisassociateIpAddress {
    const NAME: &'static str = "disassociateIpAddress";
    const ASYNC: bool = true;
    type Response = SuccessResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set("id", self.id.clone());
        params
    }
}

/// Parameters for `listPublicIpAddresses`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListPublicIpAddresses {
    /// Restrict to one address.
    pub id: Option<String>,
    /// Restrict to one address value.
    pub ip_address: Option<String>,
    /// Restrict to one zone.
    pub zone_id: Option<String>,
    /// Restrict to addresses of one network.
    pub associated_network_id: Option<String>,
    /// Only allocated addresses.
    pub allocated_only: Option<bool>,
    /// Only static NAT addresses.
    pub is_static_nat: Option<bool>,
    /// Free-text filter.
    pub keyword: Option<String>,
    /// Page number.
    pub page: Option<i64>,
    /// Page size.
    pub page_size: Option<i64>,
}

impl ListPublicIpAddresses {
    /// Creates an unfiltered listing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to one address.
    #[must_use]
    pub fn id(mut self, value: impl Into<String>) -> Self {
        self.id = Some(value.into());
        self
    }

    /// Restricts the listing to one zone.
    #[must_use]
    pub fn zone_id(mut self, value: impl Into<String>) -> Self {
        self.zone_id = Some(value.into());
        self
    }

    /// Restricts the listing to one network.
    #[must_use]
    pub fn associated_network_id(mut self, value: impl Into<String>) -> Self {
        self.associated_network_id = Some(value.into());
        self
    }

    /// Lists only allocated addresses.
    #[must_use]
    pub const fn allocated_only(mut self, value: bool) -> Self {
        self.allocated_only = Some(value);
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

impl Command for ListPublicIpAddresses {
    const NAME: &'static str = "listPublicIpAddresses";
    type Response = ListPublicIpAddressesResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set_opt("id", self.id.as_deref());
        params.set_opt("ipaddress", self.ip_address.as_deref());
        params.set_opt("zoneid", self.zone_id.as_deref());
        params.set_opt("associatednetworkid", self.associated_network_id.as_deref());
        params.set_bool("allocatedonly", self.allocated_only);
        params.set_bool("isstaticnat", self.is_static_nat);
        params.set_opt("keyword", self.keyword.as_deref());
        params.set_int("page", self.page);
        params.set_int("pagesize", self.page_size);
        params
    }
}

/// Response of `listPublicIpAddresses`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ListPublicIpAddressesResponse {
    /// Total number of matching addresses.
    pub count: i64,
    /// Addresses on this page.
    #[serde(rename = "publicipaddress")]
    pub public_ip_addresses: Vec<IpAddress>,
}

async_response!(AssociateIpAddressResponse);
sync_response!(ListPublicIpAddressesResponse);
