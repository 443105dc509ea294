use serde::{Deserialize, Serialize};

use atlas_core::{Entity, RecordId};

use crate::resource::Resource;
use crate::rules::Rule;
use crate::schema::{FieldSpec, FormSchema};
use crate::serde_amount;
use crate::store::EntityStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub department_id: Option<RecordId>,
    #[serde(deserialize_with = "serde_amount::amount")]
    pub amount: f64,
    #[serde(default, deserialize_with = "serde_amount::optional_amount")]
    pub spent: Option<f64>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Budget {
    pub fn remaining(&self) -> f64 {
        self.amount - self.spent.unwrap_or(0.0)
    }
}

impl Entity for Budget {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Budgets;

impl Resource for Budgets {
    type Record = Budget;

    const ENDPOINT: &'static str = "/api/budgets";
    const LABEL: &'static str = "Budget";

    fn schema() -> FormSchema {
        FormSchema::new()
            .field(FieldSpec::text("name", "Name").required().rule(Rule::MaxLength(255)))
            .field(FieldSpec::integer("departmentId", "Department"))
            .field(FieldSpec::number("amount", "Amount").required().rule(Rule::Min(0.0)))
            .field(FieldSpec::date("startDate", "Start date").required())
            .field(FieldSpec::date("endDate", "End date").required().rule(Rule::NotBefore("startDate")))
            .field(FieldSpec::text("description", "Description").rule(Rule::MaxLength(1000)))
    }
}

pub type BudgetStore = EntityStore<Budgets>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decimal_columns_decode() {
        let budget: Budget = serde_json::from_value(json!({
            "id": 1,
            "name": "Marketing FY25",
            "department_id": 4,
            "amount": "12000.00",
            "spent": "2500.50",
            "start_date": "2025-01-01",
            "end_date": "2025-12-31"
        }))
        .unwrap();

        assert_eq!(budget.remaining(), 9499.5);
    }
}
