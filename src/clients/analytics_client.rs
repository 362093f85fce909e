use crate::clients::{MenuClient, OrderClient};
use crate::domain::{DailyStats, MenuItemId, Order, OrderStatus, RevenueSummary, Timestamp, TopSellingItem};
use crate::error::RemoteError;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

/// Aggregate queries over orders. Cancelled orders never count.
#[derive(Clone)]
pub struct AnalyticsClient {
    orders: OrderClient,
    menu: MenuClient,
}

fn counted_in(order: &Order, start: Timestamp, end: Timestamp) -> bool {
    order.status != OrderStatus::Cancelled && (start..=end).contains(&order.created_at)
}

impl AnalyticsClient {
    pub fn new(orders: OrderClient, menu: MenuClient) -> Self {
        Self { orders, menu }
    }

    #[instrument(skip(self))]
    pub async fn get_revenue_and_order_count(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<RevenueSummary, RemoteError> {
        let orders = self.orders.get_all_orders().await?;
        let summary = orders
            .iter()
            .filter(|order| counted_in(order, start, end))
            .fold(RevenueSummary::default(), |acc, order| RevenueSummary {
                revenue: acc.revenue + order.total_amount,
                order_count: acc.order_count + 1,
            });
        debug!(revenue = summary.revenue, orders = summary.order_count, "Revenue computed");
        Ok(summary)
    }

    /// One entry per UTC day that had orders, oldest first.
    #[instrument(skip(self))]
    pub async fn get_daily_breakdown(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<DailyStats>, RemoteError> {
        let orders = self.orders.get_all_orders().await?;
        let mut days: BTreeMap<Timestamp, DailyStats> = BTreeMap::new();
        for order in orders.iter().filter(|order| counted_in(order, start, end)) {
            let date = order.created_at.start_of_day();
            let day = days.entry(date).or_insert(DailyStats {
                date,
                revenue: 0.0,
                order_count: 0,
            });
            day.revenue += order.total_amount;
            day.order_count += 1;
        }
        Ok(days.into_values().collect())
    }

    /// Best sellers by quantity, ties broken by menu item id.
    #[instrument(skip(self))]
    pub async fn get_top_selling_items(&self, limit: usize) -> Result<Vec<TopSellingItem>, RemoteError> {
        let (orders, menu) = tokio::try_join!(self.orders.get_all_orders(), self.menu.get_all_menu_items())?;

        let mut quantities: HashMap<MenuItemId, u64> = HashMap::new();
        for order in orders.iter().filter(|order| order.status != OrderStatus::Cancelled) {
            for line in &order.items {
                *quantities.entry(line.menu_item_id).or_default() += line.quantity;
            }
        }

        let names: HashMap<MenuItemId, &str> =
            menu.iter().map(|item| (item.id, item.name.as_str())).collect();

        let mut ranked: Vec<TopSellingItem> = quantities
            .into_iter()
            .map(|(menu_item_id, total_quantity)| TopSellingItem {
                menu_item_id,
                menu_item_name: names
                    .get(&menu_item_id)
                    .map(|name| name.to_string())
                    .unwrap_or_else(|| format!("Item #{menu_item_id}")),
                total_quantity,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.total_quantity
                .cmp(&a.total_quantity)
                .then(a.menu_item_id.cmp(&b.menu_item_id))
        });
        ranked.truncate(limit);
        Ok(ranked)
    }
}
