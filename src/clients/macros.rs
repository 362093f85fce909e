/// `get_<entity>(id)`: a missing row is a `RemoteError::NotFound`.
macro_rules! impl_client_get {
    ($client_name:ident, $entity:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: <$entity as $crate::actor_framework::Entity>::Id,
                ) -> Result<$entity, $crate::error::RemoteError> {
                    tracing::debug!("Sending request");
                    self.inner.get(id.clone()).await?.ok_or_else(|| {
                        $crate::error::RemoteError::NotFound(format!(
                            "{} {}",
                            <$entity as $crate::actor_framework::Entity>::KIND,
                            id
                        ))
                    })
                }
            }
        }
    };
}

macro_rules! impl_client_delete {
    ($client_name:ident, $entity:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $entity_name_snake>](
                    &self,
                    id: <$entity as $crate::actor_framework::Entity>::Id,
                ) -> Result<(), $crate::error::RemoteError> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id).await.map_err(Into::into)
                }
            }
        }
    };
}

/// `get_all_<plural>()`, rows in id order.
macro_rules! impl_client_list {
    ($client_name:ident, $entity:ty, $plural_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_all_ $plural_snake>](
                    &self,
                ) -> Result<Vec<$entity>, $crate::error::RemoteError> {
                    tracing::debug!("Sending request");
                    self.inner.list().await.map_err(Into::into)
                }
            }
        }
    };
}

macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $entity_name_snake:ident, $plural_snake:ident) => {
        impl_client_new!($client_name, $entity);
        impl_client_get!($client_name, $entity, $entity_name_snake);
        impl_client_delete!($client_name, $entity, $entity_name_snake);
        impl_client_list!($client_name, $entity, $plural_snake);
    };
}
