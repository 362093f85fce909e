use crate::actor_framework::Entity;
use crate::domain::{InventoryItem, InventoryItemFields, InventoryItemId};

/// Custom actions for inventory items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InventoryAction {
    /// Overwrites the quantity on hand.
    SetStock(f64),
}

fn check_amount(what: &str, value: f64) -> Result<(), String> {
    if value.is_nan() || value < 0.0 {
        return Err(format!("{what} must be a non-negative number, got {value}"));
    }
    Ok(())
}

fn check(fields: &InventoryItemFields) -> Result<(), String> {
    if fields.name.trim().is_empty() {
        return Err("Inventory item name is required".to_string());
    }
    check_amount("Quantity", fields.quantity)?;
    check_amount("Low stock threshold", fields.low_stock_threshold)
}

impl Entity for InventoryItem {
    type Id = InventoryItemId;
    type CreatePayload = InventoryItemFields;
    type Patch = InventoryItemFields;
    type Action = InventoryAction;
    type ActionResult = InventoryItem;

    const KIND: &'static str = "inventory item";

    fn id(&self) -> &InventoryItemId {
        &self.id
    }

    fn from_create(id: InventoryItemId, fields: InventoryItemFields) -> Result<Self, String> {
        check(&fields)?;
        Ok(Self {
            id,
            name: fields.name,
            unit: fields.unit,
            quantity: fields.quantity,
            low_stock_threshold: fields.low_stock_threshold,
        })
    }

    fn on_update(&mut self, fields: InventoryItemFields) -> Result<(), String> {
        check(&fields)?;
        self.name = fields.name;
        self.unit = fields.unit;
        self.quantity = fields.quantity;
        self.low_stock_threshold = fields.low_stock_threshold;
        Ok(())
    }

    fn handle_action(&mut self, action: InventoryAction) -> Result<InventoryItem, String> {
        match action {
            InventoryAction::SetStock(quantity) => {
                check_amount("Quantity", quantity)?;
                self.quantity = quantity;
                Ok(self.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_updates_reject_negative_amounts() {
        let mut item = InventoryItem::from_create(
            1,
            InventoryItemFields {
                name: "Kale".into(),
                unit: "kg".into(),
                quantity: 4.0,
                low_stock_threshold: 2.0,
            },
        )
        .unwrap();
        assert!(item.handle_action(InventoryAction::SetStock(-1.0)).is_err());
        let updated = item.handle_action(InventoryAction::SetStock(1.5)).unwrap();
        assert!(updated.is_low_stock());
    }
}
