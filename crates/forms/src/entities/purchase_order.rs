use serde::{Deserialize, Serialize};

use atlas_core::{Entity, RecordId};

use crate::resource::Resource;
use crate::rules::Rule;
use crate::schema::{FieldSpec, FormSchema};
use crate::serde_amount;
use crate::store::EntityStore;

pub const ORDER_STATUSES: &[&str] = &["draft", "pending", "approved", "received", "cancelled"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: RecordId,
    pub vendor_id: RecordId,
    pub order_number: String,
    pub order_date: String,
    #[serde(default)]
    pub expected_delivery_date: Option<String>,
    #[serde(deserialize_with = "serde_amount::amount")]
    pub total_amount: f64,
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PurchaseOrder {
    pub fn is_open(&self) -> bool {
        !matches!(self.status.as_str(), "received" | "cancelled")
    }
}

impl Entity for PurchaseOrder {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PurchaseOrders;

impl Resource for PurchaseOrders {
    type Record = PurchaseOrder;

    const ENDPOINT: &'static str = "/api/purchase-orders";
    const LABEL: &'static str = "Purchase order";

    fn schema() -> FormSchema {
        FormSchema::new()
            .field(FieldSpec::integer("vendorId", "Vendor").required())
            .field(FieldSpec::text("orderNumber", "Order number").required().rule(Rule::MaxLength(50)))
            .field(FieldSpec::date("orderDate", "Order date").required())
            .field(
                FieldSpec::date("expectedDeliveryDate", "Expected delivery date")
                    .rule(Rule::NotBefore("orderDate")),
            )
            .field(FieldSpec::number("totalAmount", "Total amount").required().rule(Rule::Min(0.0)))
            .field(
                FieldSpec::text("status", "Status")
                    .initial("draft")
                    .required()
                    .rule(Rule::OneOf(ORDER_STATUSES)),
            )
            .field(FieldSpec::text("notes", "Notes").rule(Rule::MaxLength(1000)))
    }
}

pub type PurchaseOrderStore = EntityStore<PurchaseOrders>;
