use serde::{Deserialize, Serialize};

use atlas_core::{Entity, RecordId};

use crate::resource::Resource;
use crate::rules::Rule;
use crate::schema::{FieldSpec, FormSchema};
use crate::serde_amount;
use crate::store::EntityStore;

pub const PAYROLL_STATUSES: &[&str] = &["draft", "processed", "paid"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payroll {
    pub id: RecordId,
    pub employee_id: RecordId,
    pub pay_period_start: String,
    pub pay_period_end: String,
    #[serde(deserialize_with = "serde_amount::amount")]
    pub basic_salary: f64,
    #[serde(default, deserialize_with = "serde_amount::optional_amount")]
    pub allowances: Option<f64>,
    #[serde(default, deserialize_with = "serde_amount::optional_amount")]
    pub deductions: Option<f64>,
    pub status: String,
}

impl Payroll {
    pub fn net_salary(&self) -> f64 {
        self.basic_salary + self.allowances.unwrap_or(0.0) - self.deductions.unwrap_or(0.0)
    }
}

impl Entity for Payroll {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Payrolls;

impl Resource for Payrolls {
    type Record = Payroll;

    const ENDPOINT: &'static str = "/api/payrolls";
    const LABEL: &'static str = "Payroll";

    fn schema() -> FormSchema {
        FormSchema::new()
            .field(FieldSpec::integer("employeeId", "Employee").required())
            .field(FieldSpec::date("payPeriodStart", "Pay period start").required())
            .field(
                FieldSpec::date("payPeriodEnd", "Pay period end")
                    .required()
                    .rule(Rule::NotBefore("payPeriodStart")),
            )
            .field(FieldSpec::number("basicSalary", "Basic salary").required().rule(Rule::Min(0.0)))
            .field(FieldSpec::number("allowances", "Allowances").initial("0").rule(Rule::Min(0.0)))
            .field(FieldSpec::number("deductions", "Deductions").initial("0").rule(Rule::Min(0.0)))
            .field(
                FieldSpec::text("status", "Status")
                    .initial("draft")
                    .required()
                    .rule(Rule::OneOf(PAYROLL_STATUSES)),
            )
    }
}

pub type PayrollStore = EntityStore<Payrolls>;
