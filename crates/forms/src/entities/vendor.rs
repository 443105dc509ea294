use serde::{Deserialize, Serialize};

use atlas_core::{Entity, RecordId};

use crate::resource::Resource;
use crate::rules::Rule;
use crate::schema::{FieldSpec, FormSchema};
use crate::store::EntityStore;

pub const VENDOR_STATUSES: &[&str] = &["active", "inactive"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: RecordId,
    pub vendor_name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub status: String,
}

impl Entity for Vendor {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Vendors;

impl Resource for Vendors {
    type Record = Vendor;

    const ENDPOINT: &'static str = "/api/vendors";
    const LABEL: &'static str = "Vendor";

    fn schema() -> FormSchema {
        FormSchema::new()
            .field(FieldSpec::text("vendorName", "Vendor name").required().rule(Rule::MaxLength(255)))
            .field(FieldSpec::text("contactPerson", "Contact person").rule(Rule::MaxLength(255)))
            .field(FieldSpec::text("email", "Email").required().rule(Rule::Email))
            .field(FieldSpec::text("phone", "Phone").rule(Rule::MaxLength(20)))
            .field(FieldSpec::text("address", "Address").rule(Rule::MaxLength(500)))
            .field(
                FieldSpec::text("status", "Status")
                    .initial("active")
                    .required()
                    .rule(Rule::OneOf(VENDOR_STATUSES)),
            )
    }
}

pub type VendorStore = EntityStore<Vendors>;
