use super::actions::MenuAction;
use crate::actor_framework::Entity;
use crate::domain::{MenuItem, MenuItemFields, MenuItemId};

fn check(fields: &MenuItemFields) -> Result<(), String> {
    if fields.name.trim().is_empty() {
        return Err("Menu item name is required".to_string());
    }
    if fields.price.is_nan() || fields.price < 0.0 {
        return Err(format!("Invalid price: {}", fields.price));
    }
    Ok(())
}

impl Entity for MenuItem {
    type Id = MenuItemId;
    type CreatePayload = MenuItemFields;
    type Patch = MenuItemFields;
    type Action = MenuAction;
    type ActionResult = MenuItem;

    const KIND: &'static str = "menu item";

    fn id(&self) -> &MenuItemId {
        &self.id
    }

    /// New menu items are available immediately.
    fn from_create(id: MenuItemId, fields: MenuItemFields) -> Result<Self, String> {
        check(&fields)?;
        Ok(Self {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            image_url: fields.image_url,
            is_available: true,
        })
    }

    /// Replaces every editable field. Availability is left alone.
    fn on_update(&mut self, fields: MenuItemFields) -> Result<(), String> {
        check(&fields)?;
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.category = fields.category;
        self.image_url = fields.image_url;
        Ok(())
    }

    fn handle_action(&mut self, action: MenuAction) -> Result<MenuItem, String> {
        match action {
            MenuAction::ToggleAvailability => {
                self.is_available = !self.is_available;
                Ok(self.clone())
            }
        }
    }
}
