use crate::domain::OrderStatus;

/// Custom actions for orders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderAction {
    /// Moves the order to the given status. Illegal transitions are
    /// rejected and leave the order unchanged; the current status is a no-op.
    SetStatus(OrderStatus),
}
