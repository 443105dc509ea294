use serde::{Deserialize, Serialize};

use atlas_core::{Entity, RecordId};

use crate::resource::Resource;
use crate::rules::Rule;
use crate::schema::{FieldSpec, FormSchema};
use crate::serde_amount;
use crate::store::EntityStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: RecordId,
    pub title: String,
    pub department_id: RecordId,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "serde_amount::optional_amount")]
    pub min_salary: Option<f64>,
    #[serde(default, deserialize_with = "serde_amount::optional_amount")]
    pub max_salary: Option<f64>,
}

impl Entity for Position {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Positions;

impl Resource for Positions {
    type Record = Position;

    const ENDPOINT: &'static str = "/api/positions";
    const LABEL: &'static str = "Position";

    fn schema() -> FormSchema {
        FormSchema::new()
            .field(FieldSpec::text("title", "Title").required().rule(Rule::MaxLength(255)))
            .field(FieldSpec::integer("departmentId", "Department").required())
            .field(FieldSpec::text("description", "Description").rule(Rule::MaxLength(1000)))
            .field(FieldSpec::number("minSalary", "Minimum salary").rule(Rule::Min(0.0)))
            .field(FieldSpec::number("maxSalary", "Maximum salary").rule(Rule::Min(0.0)))
    }
}

pub type PositionStore = EntityStore<Positions>;
