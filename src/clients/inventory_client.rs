use crate::actor_framework::ResourceClient;
use crate::domain::{InventoryItem, InventoryItemFields, InventoryItemId};
use crate::error::RemoteError;
use crate::inventory_actor::InventoryAction;
use tracing::{debug, instrument};

/// Client for inventory.
///
/// The service offers no way to enumerate every item; callers keep their own
/// record of what they created (see [`crate::store::Store`]).
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<InventoryItem>,
}

impl_client_new!(InventoryClient, InventoryItem);
impl_client_delete!(InventoryClient, InventoryItem, inventory_item);

impl InventoryClient {
    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn create_inventory_item(&self, item: InventoryItemFields) -> Result<InventoryItem, RemoteError> {
        debug!("Sending request");
        self.inner.create(item).await.map_err(Into::into)
    }

    #[instrument(skip(self, item))]
    pub async fn update_inventory_item(
        &self,
        id: InventoryItemId,
        item: InventoryItemFields,
    ) -> Result<InventoryItem, RemoteError> {
        debug!("Sending request");
        self.inner.update(id, item).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn update_stock_level(&self, id: InventoryItemId, quantity: f64) -> Result<InventoryItem, RemoteError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, InventoryAction::SetStock(quantity))
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn get_low_stock_items(&self) -> Result<Vec<InventoryItem>, RemoteError> {
        debug!("Sending request");
        let mut items = self.inner.list().await?;
        items.retain(InventoryItem::is_low_stock);
        Ok(items)
    }
}
