use crate::domain::{DailyStats, Timestamp, TopSellingItem};
use serde::Serialize;

/// Range selector on the analytics screen: label and length in days.
pub const RANGE_OPTIONS: [(&str, i64); 3] = [("7 days", 7), ("30 days", 30), ("90 days", 90)];

/// Bar length of each best seller as a percentage of the first (leading) one.
pub fn bar_widths(items: &[TopSellingItem]) -> Vec<f64> {
    let leading = items.first().map_or(1, |item| item.total_quantity.max(1)) as f64;
    items
        .iter()
        .map(|item| item.total_quantity as f64 / leading * 100.0)
        .collect()
}

/// From midnight `days` days ago up to `now`.
pub fn range_bounds(now: Timestamp, days: i64) -> (Timestamp, Timestamp) {
    (now.plus_days(-days).start_of_day(), now)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Milliseconds since the epoch, for the chart axis.
    pub day_millis: i64,
    pub revenue: f64,
    pub orders: u64,
}

pub fn revenue_chart(days: &[DailyStats]) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = days
        .iter()
        .map(|day| ChartPoint {
            day_millis: day.date.as_millis(),
            revenue: day.revenue,
            orders: day.order_count,
        })
        .collect();
    points.sort_by_key(|point| point.day_millis);
    points
}
