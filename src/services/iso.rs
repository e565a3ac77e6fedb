//! ISO service: attaching and listing ISO images.

use serde::Deserialize;

use crate::command::{Command, async_response, sync_response};
use crate::reshape::ResultShape;
use crate::transport::CommandParams;

/// Subset of the virtual machine record returned by ISO operations.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct VirtualMachine {
    /// Virtual machine identifier.
    pub id: String,
    /// Virtual machine name.
    pub name: String,
    /// Display name.
    #[serde(rename = "displayname")]
    pub display_name: String,
    /// Power state.
    pub state: String,
    /// Attached ISO.
    #[serde(rename = "isoid")]
    pub iso_id: String,
    /// Attached ISO name.
    #[serde(rename = "isoname")]
    pub iso_name: String,
    /// Attached ISO description.
    #[serde(rename = "isodisplaytext")]
    pub iso_display_text: String,
    /// Template the machine was created from.
    #[serde(rename = "templateid")]
    pub template_id: String,
    /// Zone of the machine.
    #[serde(rename = "zoneid")]
    pub zone_id: String,
    /// Zone name.
    #[serde(rename = "zonename")]
    pub zone_name: String,
}

/// ISO image.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Iso {
    /// ISO identifier.
    pub id: String,
    /// ISO name.
    pub name: String,
    /// Description.
    #[serde(rename = "displaytext")]
    pub display_text: String,
    /// Whether the ISO is bootable.
    pub bootable: bool,
    /// Whether the ISO is public.
    #[serde(rename = "ispublic")]
    pub is_public: bool,
    /// Whether the ISO is ready for use.
    #[serde(rename = "isready")]
    pub is_ready: bool,
    /// Guest OS type.
    #[serde(rename = "ostypeid")]
    pub os_type_id: String,
    /// Guest OS type name.
    #[serde(rename = "ostypename")]
    pub os_type_name: String,
    /// Size in bytes.
    pub size: i64,
    /// Download or copy status.
    pub status: String,
    /// Zone holding the ISO.
    #[serde(rename = "zoneid")]
    pub zone_id: String,
    /// Zone name.
    #[serde(rename = "zonename")]
    pub zone_name: String,
    /// Creation timestamp.
    pub created: String,
}

/// Parameters for `attachIso`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttachIso {
    /// ISO to attach.
    pub id: String,
    /// Target virtual machine.
    pub virtual_machine_id: String,
    /// Attach even if the machine is running an incompatible OS.
    pub force: Option<bool>,
}

impl AttachIso {
    /// Creates a request attaching ISO `id` to `virtual_machine_id`.
    #[must_use]
    pub fn new(id: impl Into<String>, virtual_machine_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            virtual_machine_id: virtual_machine_id.into(),
            force: None,
        }
    }

    /// Sets the force flag.
    #[must_use]
    pub const fn force(mut self, value: bool) -> Self {
        self.force = Some(value);
        self
    }
}

impl Command for AttachIso {
    const NAME: &'static str = "attachIso";
    const ASYNC: bool = true;
    const SHAPE: ResultShape = ResultShape::Nested;
    type Response = IsoVirtualMachineResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set("id", self.id.clone());
        params.set("virtualmachineid", self.virtual_machine_id.clone());
        params.set_bool("forced", self.force);
        params
    }
}

/// Parameters for `detachIso`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DetachIso {
    /// Virtual machine to detach from.
    pub virtual_machine_id: String,
    /// Detach even if the guest holds the device.
    pub force: Option<bool>,
}

impl DetachIso {
    /// Creates a request detaching the ISO of `virtual_machine_id`.
    #[must_use]
    pub fn new(virtual_machine_id: impl Into<String>) -> Self {
        Self {
            virtual_machine_id: virtual_machine_id.into(),
            force: None,
        }
    }

    /// Sets the force flag.
    #[must_use]
    pub const fn force(mut self, value: bool) -> Self {
        self.force = Some(value);
        self
    }
}

impl Command for DetachIso {
    const NAME: &'static str = "detachIso";
    const ASYNC: bool = true;
    const SHAPE: ResultShape = ResultShape::Nested;
    type Response = IsoVirtualMachineResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set("virtualmachineid", self.virtual_machine_id.clone());
        params.set_bool("forced", self.force);
        params
    }
}

/// Response of `attachIso` and `detachIso`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct IsoVirtualMachineResponse {
    /// Job that changed the attachment.
    #[serde(rename = "jobid", default)]
    pub job_id: String,
    /// Status of that job.
    #[serde(rename = "jobstatus", default)]
    pub job_status: i64,
    /// Updated virtual machine.
    #[serde(flatten)]
    pub virtual_machine: VirtualMachine,
}

/// Parameters for `listIsos`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListIsos {
    /// Restrict to one ISO.
    pub id: Option<String>,
    /// Restrict by name.
    pub name: Option<String>,
    /// Ownership filter (`featured`, `self`, `community`, ...).
    pub iso_filter: Option<String>,
    /// Restrict to one zone.
    pub zone_id: Option<String>,
    /// Only bootable ISOs.
    pub bootable: Option<bool>,
    /// Only ready ISOs.
    pub is_ready: Option<bool>,
    /// Free-text filter.
    pub keyword: Option<String>,
    /// Page number.
    pub page: Option<i64>,
    /// Page size.
    pub page_size: Option<i64>,
}

impl ListIsos {
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

    /// Sets the ownership filter.
    #[must_use]
    pub fn iso_filter(mut self, value: impl Into<String>) -> Self {
        self.iso_filter = Some(value.into());
        self
    }

    /// Restricts the listing to one zone.
    #[must_use]
    pub fn zone_id(mut self, value: impl Into<String>) -> Self {
        self.zone_id = Some(value.into());
        self
    }

    /// Lists only bootable ISOs.
    #[must_use]
    pub const fn bootable(mut self, value: bool) -> Self {
        self.bootable = Some(value);
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

impl Command for ListIsos {
    const NAME: &'static str = "listIsos";
    type Response = ListIsosResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set_opt("id", self.id.as_deref());
        params.set_opt("name", self.name.as_deref());
        params.set_opt("isofilter", self.iso_filter.as_deref());
        params.set_opt("zoneid", self.zone_id.as_deref());
        params.set_bool("bootable", self.bootable);
        params.set_bool("isready", self.is_ready);
        params.set_opt("keyword", self.keyword.as_deref());
        params.set_int("page", self.page);
        params.set_int("pagesize", self.page_size);
        params
    }
}

/// Response of `listIsos`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ListIsosResponse {
    /// Total number of matching ISOs.
    pub count: i64,
    /// ISOs on this page.
    #[serde(rename = "iso")]
    pub isos: Vec<Iso>,
}

async_response!(IsoVirtualMachineResponse);
sync_response!(ListIsosResponse);
