use crate::app_system::Backend;
use crate::domain::{
    Customer, DailyStats, InventoryItem, MenuItem, Order, OrderStatus, Plan, PlanEnrollment,
    RevenueSummary, Subscription, Timestamp, TopSellingItem,
};
use crate::error::RemoteError;
use tracing::{debug, instrument};

/// A read the screens can issue against the collaborator. Each variant is
/// one cache entry in the [`crate::store::Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    AllOrders,
    /// `new` and `preparing`, fetched as two status queries and merged.
    ActiveOrders,
    OrdersByStatus(OrderStatus),
    AvailableMenu,
    AllMenu,
    LowStock,
    Subscriptions,
    ExpiringSubscriptions,
    ActiveSubscriptionCount,
    Customers,
    Plans,
    PlanEnrollment,
    RevenueRange(Timestamp, Timestamp),
    DailyBreakdown(Timestamp, Timestamp),
    TopSelling(usize),
}

/// What a [`Query`] returns.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Orders(Vec<Order>),
    Menu(Vec<MenuItem>),
    Inventory(Vec<InventoryItem>),
    Subscriptions(Vec<Subscription>),
    Customers(Vec<Customer>),
    Plans(Vec<Plan>),
    Enrollment(Vec<PlanEnrollment>),
    Count(u64),
    Revenue(RevenueSummary),
    Daily(Vec<DailyStats>),
    TopSelling(Vec<TopSellingItem>),
}

impl Query {
    /// Queries whose results are order rows.
    pub fn reads_orders(&self) -> bool {
        matches!(
            self,
            Query::AllOrders | Query::ActiveOrders | Query::OrdersByStatus(_)
        )
    }
}

#[instrument(skip(backend))]
pub async fn fetch(backend: &Backend, query: &Query) -> Result<QueryData, RemoteError> {
    debug!("Fetching");
    let data = match *query {
        Query::AllOrders => QueryData::Orders(backend.orders.get_all_orders().await?),
        Query::ActiveOrders => QueryData::Orders(backend.orders.get_active_orders().await?),
        Query::OrdersByStatus(status) => {
            QueryData::Orders(backend.orders.get_orders_by_status(status).await?)
        }
        Query::AvailableMenu => QueryData::Menu(backend.menu.get_available_menu_items().await?),
        Query::AllMenu => QueryData::Menu(backend.menu.get_all_menu_items().await?),
        Query::LowStock => QueryData::Inventory(backend.inventory.get_low_stock_items().await?),
        Query::Subscriptions => {
            QueryData::Subscriptions(backend.subscriptions.get_all_subscriptions().await?)
        }
        Query::ExpiringSubscriptions => {
            QueryData::Subscriptions(backend.subscriptions.get_expiring_subscriptions().await?)
        }
        Query::ActiveSubscriptionCount => {
            QueryData::Count(backend.subscriptions.get_active_subscription_count().await?)
        }
        Query::Customers => QueryData::Customers(backend.customers.get_all_customers().await?),
        Query::Plans => QueryData::Plans(backend.plans.get_all_plans().await?),
        Query::PlanEnrollment => {
            QueryData::Enrollment(backend.plans.get_plan_enrollment_counts().await?)
        }
        Query::RevenueRange(start, end) => {
            QueryData::Revenue(backend.analytics.get_revenue_and_order_count(start, end).await?)
        }
        Query::DailyBreakdown(start, end) => {
            QueryData::Daily(backend.analytics.get_daily_breakdown(start, end).await?)
        }
        Query::TopSelling(limit) => {
            QueryData::TopSelling(backend.analytics.get_top_selling_items(limit).await?)
        }
    };
    Ok(data)
}
