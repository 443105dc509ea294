use serde::{Deserialize, Serialize};

use atlas_core::{Entity, RecordId};

use crate::resource::Resource;
use crate::rules::Rule;
use crate::schema::{FieldSpec, FormSchema};
use crate::serde_amount;
use crate::store::EntityStore;

pub const EMPLOYEE_STATUSES: &[&str] = &["active", "on_leave", "terminated"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub department_id: RecordId,
    #[serde(default)]
    pub position_id: Option<RecordId>,
    pub hire_date: String,
    #[serde(default, deserialize_with = "serde_amount::optional_amount")]
    pub salary: Option<f64>,
    pub status: String,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Employee {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Employees;

impl Resource for Employees {
    type Record = Employee;

    const ENDPOINT: &'static str = "/api/employees";
    const LABEL: &'static str = "Employee";

    fn schema() -> FormSchema {
        FormSchema::new()
            .field(FieldSpec::text("firstName", "First name").required().rule(Rule::MaxLength(100)))
            .field(FieldSpec::text("lastName", "Last name").required().rule(Rule::MaxLength(100)))
            .field(FieldSpec::text("email", "Email").required().rule(Rule::Email))
            .field(FieldSpec::text("phone", "Phone").rule(Rule::MaxLength(20)))
            .field(FieldSpec::integer("departmentId", "Department").required())
            .field(FieldSpec::integer("positionId", "Position"))
            .field(FieldSpec::date("hireDate", "Hire date").required())
            .field(FieldSpec::number("salary", "Salary").rule(Rule::Min(0.0)))
            .field(
                FieldSpec::text("status", "Status")
                    .initial("active")
                    .required()
                    .rule(Rule::OneOf(EMPLOYEE_STATUSES)),
            )
    }
}

pub type EmployeeStore = EntityStore<Employees>;
