use crate::actor_framework::ResourceClient;
use crate::domain::{
    Clock, NewSubscription, Subscription, SubscriptionChanges, SubscriptionId, SubscriptionStatus,
};
use crate::error::RemoteError;
use crate::subscription_actor::{SubscriptionAction, SubscriptionActionResult, SubscriptionCreate};
use tracing::{debug, info, instrument};

/// Client for subscriptions.
#[derive(Clone)]
pub struct SubscriptionClient {
    inner: ResourceClient<Subscription>,
    clock: Clock,
}

impl_client_get!(SubscriptionClient, Subscription, subscription);
impl_client_list!(SubscriptionClient, Subscription, subscriptions);

fn unexpected() -> RemoteError {
    RemoteError::ActorCommunicationError("Unexpected result".to_string())
}

impl SubscriptionClient {
    pub fn new(inner: ResourceClient<Subscription>, clock: Clock) -> Self {
        Self { inner, clock }
    }

    /// Starts a new term today.
    #[instrument(skip(self, subscription), fields(customer = %subscription.customer_name))]
    pub async fn create_subscription(&self, subscription: NewSubscription) -> Result<Subscription, RemoteError> {
        debug!("Sending request");
        let payload = SubscriptionCreate {
            subscription,
            start_date: (self.clock)(),
        };
        self.inner.create(payload).await.map_err(Into::into)
    }

    #[instrument(skip(self, changes))]
    pub async fn update_subscription(
        &self,
        id: SubscriptionId,
        changes: SubscriptionChanges,
    ) -> Result<Subscription, RemoteError> {
        debug!("Sending request");
        self.inner.update(id, changes).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn update_subscription_status(
        &self,
        id: SubscriptionId,
        status: SubscriptionStatus,
    ) -> Result<Subscription, RemoteError> {
        debug!("Sending request");
        match self.inner.perform_action(id, SubscriptionAction::SetStatus(status)).await? {
            SubscriptionActionResult::SetStatus(sub) => Ok(sub),
            SubscriptionActionResult::Expire(_) => Err(unexpected()),
        }
    }

    /// Sweeps active subscriptions past their end date into `expired`.
    /// Returns how many were expired.
    #[instrument(skip(self))]
    pub async fn check_and_expire_subscriptions(&self) -> Result<u64, RemoteError> {
        let now = (self.clock)();
        let mut expired = 0;
        for sub in self.inner.list().await? {
            if sub.status != SubscriptionStatus::Active || !sub.is_past_end(now) {
                continue;
            }
            match self.inner.perform_action(sub.id, SubscriptionAction::Expire { now }).await? {
                SubscriptionActionResult::Expire(true) => expired += 1,
                SubscriptionActionResult::Expire(false) => {}
                SubscriptionActionResult::SetStatus(_) => return Err(unexpected()),
            }
        }
        if expired > 0 {
            info!(expired, "Expired subscriptions");
        }
        Ok(expired)
    }

    /// Active subscriptions ending within the next two days.
    #[instrument(skip(self))]
    pub async fn get_expiring_subscriptions(&self) -> Result<Vec<Subscription>, RemoteError> {
        debug!("Sending request");
        let now = (self.clock)();
        let mut subs = self.inner.list().await?;
        subs.retain(|sub| sub.status == SubscriptionStatus::Active && sub.is_expiring_soon(now));
        Ok(subs)
    }

    #[instrument(skip(self))]
    pub async fn get_active_subscription_count(&self) -> Result<u64, RemoteError> {
        debug!("Sending request");
        let subs = self.inner.list().await?;
        Ok(subs.iter().filter(|sub| sub.status == SubscriptionStatus::Active).count() as u64)
    }
}
