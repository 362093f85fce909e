use crate::actor_framework::ResourceClient;
use crate::domain::{MenuItem, MenuItemFields, MenuItemId};
use crate::error::RemoteError;
use crate::menu_actor::MenuAction;
use tracing::{debug, instrument};

/// Client for the menu.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl_basic_client!(MenuClient, MenuItem, menu_item, menu_items);

impl MenuClient {
    /// Items currently offered on the ordering page.
    #[instrument(skip(self))]
    pub async fn get_available_menu_items(&self) -> Result<Vec<MenuItem>, RemoteError> {
        debug!("Sending request");
        let mut items = self.inner.list().await?;
        items.retain(|item| item.is_available);
        Ok(items)
    }

    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn create_menu_item(&self, item: MenuItemFields) -> Result<MenuItem, RemoteError> {
        debug!("Sending request");
        self.inner.create(item).await.map_err(Into::into)
    }

    #[instrument(skip(self, item))]
    pub async fn update_menu_item(
        &self,
        id: MenuItemId,
        item: MenuItemFields,
    ) -> Result<MenuItem, RemoteError> {
        debug!("Sending request");
        self.inner.update(id, item).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn toggle_menu_item_availability(&self, id: MenuItemId) -> Result<MenuItem, RemoteError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, MenuAction::ToggleAvailability)
            .await
            .map_err(Into::into)
    }
}
