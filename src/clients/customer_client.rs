use crate::actor_framework::ResourceClient;
use crate::domain::{Customer, CustomerFields, CustomerId};
use crate::error::RemoteError;
use tracing::{debug, instrument};

/// Client for the customer directory.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl_basic_client!(CustomerClient, Customer, customer, customers);

impl CustomerClient {
    #[instrument(skip(self, customer), fields(name = %customer.name))]
    pub async fn create_customer(&self, customer: CustomerFields) -> Result<Customer, RemoteError> {
        debug!("Sending request");
        self.inner.create(customer).await.map_err(Into::into)
    }

    #[instrument(skip(self, customer))]
    pub async fn update_customer(
        &self,
        id: CustomerId,
        customer: CustomerFields,
    ) -> Result<Customer, RemoteError> {
        debug!("Sending request");
        self.inner.update(id, customer).await.map_err(Into::into)
    }
}
