//! Inventory rules: non-negative amounts and direct stock updates.

pub mod entity;

pub use entity::InventoryAction;
