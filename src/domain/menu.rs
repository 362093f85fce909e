use super::MenuItemId;
use serde::{Deserialize, Serialize};

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image_url: String,
    pub is_available: bool,
}

/// Editable fields of a menu item, used for both create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemFields {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image_url: String,
}
