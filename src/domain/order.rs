use super::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub type OrderId = u64;
pub type MenuItemId = u64;

/// Identity recorded on orders placed without a signed-in caller.
pub const ANONYMOUS_CUSTOMER: &str = "anonymous";

/// Where an order is in the kitchen.
///
/// `New` is set once at creation. `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    #[error("Illegal status transition: {from} -> {to}")]
    Illegal { from: OrderStatus, to: OrderStatus },
}

impl OrderStatus {
    /// Board column order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::New,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            OrderStatus::New => "status-new",
            OrderStatus::Preparing => "status-preparing",
            OrderStatus::Ready => "status-ready",
            OrderStatus::Delivered => "status-delivered",
            OrderStatus::Cancelled => "status-cancelled",
        }
    }

    /// The forward step offered on an order card, if any.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::New => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Button text for the forward step out of this status.
    pub fn action_label(self) -> Option<&'static str> {
        match self {
            OrderStatus::New => Some("Start Prep"),
            OrderStatus::Preparing => Some("Mark Ready"),
            OrderStatus::Ready => Some("Deliver"),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Still being worked on by the kitchen.
    pub fn is_active(self) -> bool {
        matches!(self, OrderStatus::New | OrderStatus::Preparing)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn can_cancel(self) -> bool {
        self.is_active()
    }

    /// Setting the current status again is allowed and changes nothing.
    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        self == target
            || self.next() == Some(target)
            || (target == OrderStatus::Cancelled && self.can_cancel())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown order status: {s}"))
    }
}

/// One line of an order. `unit_price` is captured when the order is placed
/// so later menu price changes never alter a historical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub menu_item_id: MenuItemId,
    pub quantity: u64,
    pub unit_price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// Represents a customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_phone: String,
    pub created_at: Timestamp,
    pub total_amount: f64,
    pub notes: String,
    pub customer_id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
}

/// Request to place an order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceOrder {
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<OrderItem>,
    pub notes: String,
}

impl Order {
    /// Moves the order to `target`. Returns whether anything changed.
    pub fn apply_status(&mut self, target: OrderStatus) -> Result<bool, TransitionError> {
        if !self.status.can_transition_to(target) {
            return Err(TransitionError::Illegal {
                from: self.status,
                to: target,
            });
        }
        let changed = self.status != target;
        self.status = target;
        Ok(changed)
    }

    /// Ticket number as printed in the kitchen, e.g. `#0007`.
    pub fn ticket_number(&self) -> String {
        format!("#{:04}", self.id)
    }
}

pub fn order_total(items: &[OrderItem]) -> f64 {
    items.iter().map(OrderItem::line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: 7,
            customer_name: "Ana".into(),
            customer_phone: "555".into(),
            created_at: Timestamp(1),
            total_amount: 12.5,
            notes: String::new(),
            customer_id: ANONYMOUS_CUSTOMER.into(),
            items: vec![OrderItem { menu_item_id: 1, quantity: 1, unit_price: 12.5 }],
            status,
        }
    }

    #[test]
    fn test_forward_path_and_labels() {
        let steps: Vec<_> = [OrderStatus::New, OrderStatus::Preparing, OrderStatus::Ready]
            .into_iter()
            .map(|s| (s.next().unwrap(), s.action_label().unwrap()))
            .collect();
        assert_eq!(
            steps,
            vec![
                (OrderStatus::Preparing, "Start Prep"),
                (OrderStatus::Ready, "Mark Ready"),
                (OrderStatus::Delivered, "Deliver"),
            ]
        );
        assert_eq!(OrderStatus::Delivered.next(), None);
        assert_eq!(OrderStatus::Cancelled.action_label(), None);
    }

    #[test]
    fn test_transition_relation() {
        use OrderStatus::*;
        let allowed = [
            (New, Preparing),
            (Preparing, Ready),
            (Ready, Delivered),
            (New, Cancelled),
            (Preparing, Cancelled),
        ];
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let expected = from == to || allowed.contains(&(from, to));
                assert_eq!(from.can_transition_to(to), expected, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn test_ready_orders_cannot_be_cancelled() {
        let mut ready = order(OrderStatus::Ready);
        assert_eq!(
            ready.apply_status(OrderStatus::Cancelled),
            Err(TransitionError::Illegal { from: OrderStatus::Ready, to: OrderStatus::Cancelled })
        );
        assert_eq!(ready.status, OrderStatus::Ready);
    }

    #[test]
    fn test_same_status_is_a_noop() {
        let mut preparing = order(OrderStatus::Preparing);
        let before = preparing.clone();
        assert_eq!(preparing.apply_status(OrderStatus::Preparing), Ok(false));
        assert_eq!(preparing, before);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&OrderStatus::New).unwrap(), "\"new\"");
        assert_eq!("preparing".parse::<OrderStatus>(), Ok(OrderStatus::Preparing));
        assert!("done".parse::<OrderStatus>().is_err());
        assert_eq!(order(OrderStatus::New).ticket_number(), "#0007");
    }

    proptest! {
        #[test]
        fn prop_repeating_a_status_change_is_idempotent(from in 0..5usize, to in 0..5usize) {
            let mut once = order(OrderStatus::ALL[from]);
            let first = once.apply_status(OrderStatus::ALL[to]);
            let mut twice = once.clone();
            if first.is_ok() {
                prop_assert_eq!(twice.apply_status(OrderStatus::ALL[to]), Ok(false));
            }
            prop_assert_eq!(twice, once);
        }
    }
}
