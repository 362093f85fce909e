use crate::actor_framework::ResourceClient;
use crate::clients::MenuClient;
use crate::domain::{Clock, Order, OrderId, OrderStatus, PlaceOrder, ANONYMOUS_CUSTOMER};
use crate::error::RemoteError;
use crate::order_actor::{OrderAction, OrderCreate};
use tracing::{debug, error, info, instrument};

/// Client for orders.
///
/// Placing an order is orchestrated here: every line's menu item is checked
/// against the menu before the order row is created.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    menu_client: MenuClient,
    clock: Clock,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, menu_client: MenuClient, clock: Clock) -> Self {
        Self {
            inner,
            menu_client,
            clock,
        }
    }

    #[instrument(
        skip(self, request),
        fields(customer = %request.customer_name, lines = request.items.len())
    )]
    pub async fn place_order(&self, request: PlaceOrder) -> Result<Order, RemoteError> {
        info!("Processing place_order request");

        for line in &request.items {
            match self.menu_client.get_menu_item(line.menu_item_id).await {
                Ok(item) if item.is_available => {
                    debug!(menu_item = %item.name, "Menu item validated")
                }
                Ok(item) => {
                    error!(menu_item = %item.name, "Menu item unavailable");
                    return Err(RemoteError::Rejected(format!("{} is not available", item.name)));
                }
                Err(e) => {
                    error!(error = %e, "Menu item validation failed");
                    return Err(e);
                }
            }
        }

        let payload = OrderCreate {
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            items: request.items,
            notes: request.notes,
            customer_id: ANONYMOUS_CUSTOMER.to_string(),
            created_at: (self.clock)(),
        };

        let order = self.inner.create(payload).await?;
        info!(order_id = order.id, total = order.total_amount, "Order placed");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn get_all_orders(&self) -> Result<Vec<Order>, RemoteError> {
        debug!("Sending request");
        self.inner.list().await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn get_orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, RemoteError> {
        debug!("Sending request");
        let mut orders = self.inner.list().await?;
        orders.retain(|order| order.status == status);
        Ok(orders)
    }

    /// The kitchen's working set: the `new` and `preparing` queries issued
    /// together and concatenated in that order.
    #[instrument(skip(self))]
    pub async fn get_active_orders(&self) -> Result<Vec<Order>, RemoteError> {
        let (new_orders, preparing) = tokio::try_join!(
            self.get_orders_by_status(OrderStatus::New),
            self.get_orders_by_status(OrderStatus::Preparing),
        )?;
        Ok(new_orders.into_iter().chain(preparing).collect())
    }

    /// Sends the target status as-is. Legality is decided by the service.
    #[instrument(skip(self))]
    pub async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, RemoteError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::SetStatus(status))
            .await
            .map_err(Into::into)
    }
}

impl_client_get!(OrderClient, Order, order);
