use serde::{Deserialize, Serialize};

use atlas_core::{Entity, RecordId};

use crate::resource::Resource;
use crate::rules::Rule;
use crate::schema::{FieldSpec, FormSchema};
use crate::store::EntityStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: RecordId,
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
}

impl Entity for Holiday {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Holidays;

impl Resource for Holidays {
    type Record = Holiday;

    const ENDPOINT: &'static str = "/api/holidays";
    const LABEL: &'static str = "Holiday";

    fn schema() -> FormSchema {
        FormSchema::new()
            .field(FieldSpec::text("name", "Name").required().rule(Rule::MaxLength(255)))
            .field(FieldSpec::date("date", "Date").required())
            .field(FieldSpec::text("description", "Description").rule(Rule::MaxLength(500)))
            .field(FieldSpec::boolean("isRecurring", "Recurring"))
    }
}

pub type HolidayStore = EntityStore<Holidays>;
