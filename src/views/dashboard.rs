use crate::domain::{Order, RevenueSummary, Timestamp};
use serde::Serialize;

/// Rows in the recent-orders preview.
pub const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub pending_count: usize,
    pub recent: Vec<Order>,
    pub low_stock_count: usize,
    pub active_subscriptions: Option<u64>,
    pub today: Option<RevenueSummary>,
}

/// Orders the kitchen still has to finish.
pub fn pending_count(orders: &[Order]) -> usize {
    orders.iter().filter(|order| order.status.is_active()).count()
}

/// Newest first, at most [`RECENT_LIMIT`]; equal timestamps keep input order.
pub fn recent_orders(orders: &[Order]) -> Vec<Order> {
    let mut recent: Vec<&Order> = orders.iter().collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.into_iter().take(RECENT_LIMIT).cloned().collect()
}

/// First and last nanosecond of the UTC day containing `now`.
pub fn today_bounds(now: Timestamp) -> (Timestamp, Timestamp) {
    (now.start_of_day(), now.end_of_day())
}

pub fn dashboard(orders: &[Order]) -> Dashboard {
    Dashboard {
        pending_count: pending_count(orders),
        recent: recent_orders(orders),
        low_stock_count: 0,
        active_subscriptions: None,
        today: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderStatus, NANOS_PER_DAY};
    use crate::views::test_support::order;

    #[test]
    fn test_pending_counts_new_and_preparing() {
        let orders = vec![
            order(1, OrderStatus::New, 0),
            order(2, OrderStatus::Preparing, 0),
            order(3, OrderStatus::Ready, 0),
            order(4, OrderStatus::Delivered, 0),
        ];
        assert_eq!(pending_count(&orders), 2);
        assert_eq!(pending_count(&[]), 0);
    }

    #[test]
    fn test_recent_is_newest_ten() {
        let orders: Vec<Order> = (1..=12).map(|id| order(id, OrderStatus::Delivered, id as i64)).collect();
        let recent = recent_orders(&orders);
        assert_eq!(recent.len(), RECENT_LIMIT);
        assert_eq!(recent.first().map(|o| o.id), Some(12));
        assert_eq!(recent.last().map(|o| o.id), Some(3));
    }

    #[test]
    fn test_recent_ties_keep_input_order() {
        let orders = vec![order(1, OrderStatus::New, 5), order(2, OrderStatus::New, 5)];
        let ids: Vec<_> = recent_orders(&orders).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_today_bounds() {
        let now = Timestamp(3 * NANOS_PER_DAY + 42);
        assert_eq!(
            today_bounds(now),
            (Timestamp(3 * NANOS_PER_DAY), Timestamp(4 * NANOS_PER_DAY - 1))
        );
    }
}
