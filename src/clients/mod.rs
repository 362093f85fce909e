//! Typed clients for the service's remote procedures. Every call returns
//! `Result<_, RemoteError>` and is traced with `#[instrument]`.

#[macro_use]
mod macros;

pub mod analytics_client;
pub mod customer_client;
pub mod inventory_client;
pub mod menu_client;
pub mod order_client;
pub mod plan_client;
pub mod subscription_client;

pub use analytics_client::AnalyticsClient;
pub use customer_client::CustomerClient;
pub use inventory_client::InventoryClient;
pub use menu_client::MenuClient;
pub use order_client::OrderClient;
pub use plan_client::PlanClient;
pub use subscription_client::SubscriptionClient;
