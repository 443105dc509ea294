use serde::{Deserialize, Serialize};

use atlas_core::{Entity, RecordId};

use crate::resource::Resource;
use crate::rules::Rule;
use crate::schema::{FieldSpec, FormSchema};
use crate::store::EntityStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub manager_id: Option<RecordId>,
}

impl Entity for Department {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Departments;

impl Resource for Departments {
    type Record = Department;

    const ENDPOINT: &'static str = "/api/departments";
    const LABEL: &'static str = "Department";

    fn schema() -> FormSchema {
        FormSchema::new()
            .field(
                FieldSpec::text("name", "Name")
                    .required()
                    .rule(Rule::MinLength(2))
                    .rule(Rule::MaxLength(255)),
            )
            .field(FieldSpec::text("code", "Code").rule(Rule::MaxLength(20)))
            .field(FieldSpec::text("description", "Description").rule(Rule::MaxLength(1000)))
            .field(FieldSpec::integer("managerId", "Manager"))
    }
}

pub type DepartmentStore = EntityStore<Departments>;
