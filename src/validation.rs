//! Form input checks. Anything rejected here never reaches the collaborator.

use crate::domain::{CustomerFields, InventoryItemFields, MenuItemFields, PlanFields, SubscriptionPlan};
use crate::error::ValidationError;

pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value.to_string())
}

fn non_negative(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    let value: f64 = raw.parse().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(value)
}

pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    non_negative("price", raw)
}

pub fn parse_quantity(raw: &str) -> Result<f64, ValidationError> {
    non_negative("quantity", raw)
}

pub fn parse_threshold(raw: &str) -> Result<f64, ValidationError> {
    non_negative("low stock threshold", raw)
}

/// Raw text of the menu item dialog.
#[derive(Debug, Clone, Default)]
pub struct MenuItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image_url: String,
}

impl MenuItemForm {
    pub fn validate(&self) -> Result<MenuItemFields, ValidationError> {
        Ok(MenuItemFields {
            name: required("name", &self.name)?,
            description: self.description.trim().to_string(),
            price: parse_price(&self.price)?,
            category: required("category", &self.category)?,
            image_url: self.image_url.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct InventoryForm {
    pub name: String,
    pub unit: String,
    pub quantity: String,
    pub low_stock_threshold: String,
}

impl InventoryForm {
    pub fn validate(&self) -> Result<InventoryItemFields, ValidationError> {
        Ok(InventoryItemFields {
            name: required("name", &self.name)?,
            unit: required("unit", &self.unit)?,
            quantity: parse_quantity(&self.quantity)?,
            low_stock_threshold: parse_threshold(&self.low_stock_threshold)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CustomerForm {
    pub name: String,
    pub mobile_no: String,
    pub preferences: String,
    pub address: String,
}

impl CustomerForm {
    pub fn validate(&self) -> Result<CustomerFields, ValidationError> {
        Ok(CustomerFields {
            name: required("name", &self.name)?,
            mobile_no: required("mobile number", &self.mobile_no)?,
            preferences: self.preferences.trim().to_string(),
            address: self.address.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PlanForm {
    pub name: String,
    pub plan_type: SubscriptionPlan,
    pub price_250gm: String,
    pub price_350gm: String,
    pub price_500gm: String,
    pub is_active: bool,
}

impl PlanForm {
    pub fn validate(&self) -> Result<PlanFields, ValidationError> {
        Ok(PlanFields {
            name: required("name", &self.name)?,
            plan_type: self.plan_type,
            price_250gm: parse_price(&self.price_250gm)?,
            price_350gm: parse_price(&self.price_350gm)?,
            price_500gm: parse_price(&self.price_500gm)?,
            is_active: self.is_active,
        })
    }
}
