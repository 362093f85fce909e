use crate::domain::{MenuItem, MenuItemId, OrderItem, PlaceOrder};
use crate::error::ValidationError;
use crate::validation::required;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u64,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.item.price * self.quantity as f64
    }
}

/// The customer's basket, one line per menu item, in the order added.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub notes: String,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Adds one of `item`, merging with an existing line.
    pub fn add(&mut self, item: &MenuItem) {
        match self.lines.iter_mut().find(|line| line.item.id == item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                item: item.clone(),
                quantity: 1,
            }),
        }
    }

    pub fn increase(&mut self, id: MenuItemId) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == id) {
            line.quantity += 1;
        }
    }

    /// Removes the line once its quantity reaches zero.
    pub fn decrease(&mut self, id: MenuItemId) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == id) {
            line.quantity = line.quantity.saturating_sub(1);
        }
        self.lines.retain(|line| line.quantity > 0);
    }

    pub fn remove(&mut self, id: MenuItemId) {
        self.lines.retain(|line| line.item.id != id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Builds the order request. Each line carries the price shown in the
    /// cart as its `unit_price`.
    pub fn checkout(&self, form: &CheckoutForm) -> Result<PlaceOrder, ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyCart);
        }
        Ok(PlaceOrder {
            customer_name: required("name", &form.name)?,
            customer_phone: required("phone", &form.phone)?,
            items: self
                .lines
                .iter()
                .map(|line| OrderItem {
                    menu_item_id: line.item.id,
                    quantity: line.quantity,
                    unit_price: line.item.price,
                })
                .collect(),
            notes: form.notes.trim().to_string(),
        })
    }
}
