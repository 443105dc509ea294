use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use atlas_core::{Entity, RecordId};

use crate::resource::Resource;
use crate::rules::{Rule, parse_date};
use crate::schema::{FieldSpec, FormSchema};
use crate::store::EntityStore;

pub const LEAVE_TYPES: &[&str] = &["annual", "sick", "unpaid", "maternity", "paternity"];
pub const LEAVE_STATUSES: &[&str] = &["pending", "approved", "rejected"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leave {
    pub id: RecordId,
    pub employee_id: RecordId,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: String,
}

impl Leave {
    /// Calendar days covered, both ends included.
    pub fn days(&self) -> Option<i64> {
        let start: NaiveDate = parse_date(self.start_date.get(..10)?)?;
        let end: NaiveDate = parse_date(self.end_date.get(..10)?)?;
        (end >= start).then(|| (end - start).num_days() + 1)
    }
}

impl Entity for Leave {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Leaves;

impl Resource for Leaves {
    type Record = Leave;

    const ENDPOINT: &'static str = "/api/leaves";
    const LABEL: &'static str = "Leave request";

    fn schema() -> FormSchema {
        FormSchema::new()
            .field(FieldSpec::integer("employeeId", "Employee").required())
            .field(
                FieldSpec::text("leaveType", "Leave type")
                    .required()
                    .rule(Rule::OneOf(LEAVE_TYPES)),
            )
            .field(FieldSpec::date("startDate", "Start date").required())
            .field(FieldSpec::date("endDate", "End date").required().rule(Rule::NotBefore("startDate")))
            .field(FieldSpec::text("reason", "Reason").rule(Rule::MaxLength(1000)))
            .field(
                FieldSpec::text("status", "Status")
                    .initial("pending")
                    .required()
                    .rule(Rule::OneOf(LEAVE_STATUSES)),
            )
    }
}

pub type LeaveStore = EntityStore<Leaves>;

#[cfg(test)]
mod tests {
    use super::*;

    fn leave(start: &str, end: &str) -> Leave {
        Leave {
            id: RecordId::new(1),
            employee_id: RecordId::new(2),
            leave_type: "annual".into(),
            start_date: start.into(),
            end_date: end.into(),
            reason: None,
            status: "pending".into(),
        }
    }

    #[test]
    fn counts_inclusive_days() {
        assert_eq!(leave("2025-06-02", "2025-06-06").days(), Some(5));
        assert_eq!(leave("2025-06-02T00:00:00Z", "2025-06-02").days(), Some(1));
        assert_eq!(leave("2025-06-06", "2025-06-02").days(), None);
    }
}
