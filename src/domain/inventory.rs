use serde::{Deserialize, Serialize};

pub type InventoryItemId = u64;

/// A stocked ingredient or supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub name: String,
    pub unit: String,
    pub quantity: f64,
    pub low_stock_threshold: f64,
}

impl InventoryItem {
    /// At or below the restock floor.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItemFields {
    pub name: String,
    pub unit: String,
    pub quantity: f64,
    pub low_stock_threshold: f64,
}
