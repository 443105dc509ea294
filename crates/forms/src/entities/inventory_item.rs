use serde::{Deserialize, Serialize};

use atlas_core::{Entity, RecordId};

use crate::resource::Resource;
use crate::rules::Rule;
use crate::schema::{FieldSpec, FormSchema};
use crate::serde_amount;
use crate::store::EntityStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: RecordId,
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub category: Option<String>,
    pub quantity: i64,
    #[serde(deserialize_with = "serde_amount::amount")]
    pub unit_price: f64,
    #[serde(default)]
    pub reorder_level: Option<i64>,
}

impl InventoryItem {
    pub fn needs_reorder(&self) -> bool {
        self.reorder_level.is_some_and(|level| self.quantity <= level)
    }

    pub fn stock_value(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

impl Entity for InventoryItem {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryItems;

impl Resource for InventoryItems {
    type Record = InventoryItem;

    const ENDPOINT: &'static str = "/api/inventory-items";
    const LABEL: &'static str = "Inventory item";

    fn schema() -> FormSchema {
        FormSchema::new()
            .field(FieldSpec::text("name", "Name").required().rule(Rule::MaxLength(255)))
            .field(FieldSpec::text("sku", "SKU").required().rule(Rule::MaxLength(50)))
            .field(FieldSpec::text("category", "Category").rule(Rule::MaxLength(100)))
            .field(FieldSpec::integer("quantity", "Quantity").required().initial("0").rule(Rule::Min(0.0)))
            .field(FieldSpec::number("unitPrice", "Unit price").required().rule(Rule::Min(0.0)))
            .field(FieldSpec::integer("reorderLevel", "Reorder level").rule(Rule::Min(0.0)))
    }
}

pub type InventoryItemStore = EntityStore<InventoryItems>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorder_threshold_is_inclusive() {
        let mut item = InventoryItem {
            id: RecordId::new(1),
            name: "Toner".into(),
            sku: "TN-1".into(),
            category: None,
            quantity: 5,
            unit_price: 40.0,
            reorder_level: Some(5),
        };
        assert!(item.needs_reorder());
        assert_eq!(item.stock_value(), 200.0);

        item.quantity = 6;
        assert!(!item.needs_reorder());
        item.reorder_level = None;
        assert!(!item.needs_reorder());
    }
}
