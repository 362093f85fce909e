use super::{MenuItemId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub revenue: f64,
    pub order_count: u64,
}

/// Revenue for one UTC day. `date` is the day's midnight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: Timestamp,
    pub revenue: f64,
    pub order_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSellingItem {
    pub menu_item_id: MenuItemId,
    pub menu_item_name: String,
    pub total_quantity: u64,
}
