use super::actions::OrderAction;
use crate::actor_framework::Entity;
use crate::domain::{order_total, Order, OrderId, OrderItem, OrderStatus, Timestamp};

/// Payload for creating a new order. `created_at` is stamped by the caller
/// from the system clock.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<OrderItem>,
    pub notes: String,
    pub customer_id: String,
    pub created_at: Timestamp,
}

impl Entity for Order {
    type Id = OrderId;
    type CreatePayload = OrderCreate;
    type Patch = ();
    type Action = OrderAction;
    type ActionResult = Order;

    const KIND: &'static str = "order";

    fn id(&self) -> &OrderId {
        &self.id
    }

    /// Every order starts out `New`, with its total taken from the captured
    /// line prices.
    fn from_create(id: OrderId, payload: OrderCreate) -> Result<Self, String> {
        if payload.items.is_empty() {
            return Err("An order needs at least one item".to_string());
        }
        if let Some(line) = payload.items.iter().find(|line| line.quantity == 0) {
            return Err(format!("Quantity for menu item {} must be positive", line.menu_item_id));
        }
        if payload.items.iter().any(|line| line.unit_price.is_nan() || line.unit_price < 0.0) {
            return Err("Unit prices must be non-negative".to_string());
        }

        Ok(Self {
            id,
            total_amount: order_total(&payload.items),
            customer_name: payload.customer_name,
            customer_phone: payload.customer_phone,
            created_at: payload.created_at,
            notes: payload.notes,
            customer_id: payload.customer_id,
            items: payload.items,
            status: OrderStatus::New,
        })
    }

    /// Only the status of a placed order may change, and only through
    /// [`OrderAction::SetStatus`].
    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Err("Orders cannot be edited".to_string())
    }

    fn on_delete(&self) -> Result<(), String> {
        Err("Orders cannot be deleted".to_string())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<Order, String> {
        match action {
            OrderAction::SetStatus(target) => {
                self.apply_status(target).map_err(|e| e.to_string())?;
                Ok(self.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ANONYMOUS_CUSTOMER;

    fn payload(items: Vec<OrderItem>) -> OrderCreate {
        OrderCreate {
            customer_name: "Ana".into(),
            customer_phone: "555-0101".into(),
            items,
            notes: "no onions".into(),
            customer_id: ANONYMOUS_CUSTOMER.into(),
            created_at: Timestamp(42),
        }
    }

    #[test]
    fn test_create_computes_total_and_starts_new() {
        let order = Order::from_create(
            3,
            payload(vec![
                OrderItem { menu_item_id: 1, quantity: 2, unit_price: 4.5 },
                OrderItem { menu_item_id: 2, quantity: 1, unit_price: 6.0 },
            ]),
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.total_amount, 15.0);
        assert_eq!(order.created_at, Timestamp(42));
    }

    #[test]
    fn test_create_rejects_empty_and_zero_quantity() {
        assert!(Order::from_create(1, payload(vec![])).is_err());
        assert!(Order::from_create(
            1,
            payload(vec![OrderItem { menu_item_id: 1, quantity: 0, unit_price: 1.0 }])
        )
        .is_err());
    }

    #[test]
    fn test_set_status_enforces_lifecycle() {
        let mut order = Order::from_create(
            1,
            payload(vec![OrderItem { menu_item_id: 1, quantity: 1, unit_price: 9.0 }]),
        )
        .unwrap();
        assert!(order.handle_action(OrderAction::SetStatus(OrderStatus::Ready)).is_err());
        let updated = order.handle_action(OrderAction::SetStatus(OrderStatus::Preparing)).unwrap();
        assert_eq!(updated.status, OrderStatus::Preparing);
        assert!(order.on_delete().is_err());
    }
}
