use crate::actor_framework::ResourceClient;
use crate::clients::SubscriptionClient;
use crate::domain::{Plan, PlanEnrollment, PlanFields, PlanId, SubscriptionPlan};
use crate::error::RemoteError;
use tracing::{debug, instrument};

/// Client for subscription plans.
#[derive(Clone)]
pub struct PlanClient {
    inner: ResourceClient<Plan>,
    subscriptions: SubscriptionClient,
}

impl_client_get!(PlanClient, Plan, plan);
impl_client_delete!(PlanClient, Plan, plan);
impl_client_list!(PlanClient, Plan, plans);

impl PlanClient {
    pub fn new(inner: ResourceClient<Plan>, subscriptions: SubscriptionClient) -> Self {
        Self { inner, subscriptions }
    }

    #[instrument(skip(self, plan), fields(name = %plan.name))]
    pub async fn create_plan(&self, plan: PlanFields) -> Result<Plan, RemoteError> {
        debug!("Sending request");
        self.inner.create(plan).await.map_err(Into::into)
    }

    #[instrument(skip(self, plan))]
    pub async fn update_plan(&self, id: PlanId, plan: PlanFields) -> Result<Plan, RemoteError> {
        debug!("Sending request");
        self.inner.update(id, plan).await.map_err(Into::into)
    }

    /// Enrolled (active or paused) members per plan type.
    #[instrument(skip(self))]
    pub async fn get_plan_enrollment_counts(&self) -> Result<Vec<PlanEnrollment>, RemoteError> {
        let subs = self.subscriptions.get_all_subscriptions().await?;
        Ok(SubscriptionPlan::ALL
            .into_iter()
            .map(|plan_type| PlanEnrollment {
                plan_type,
                enrolled: subs
                    .iter()
                    .filter(|sub| sub.plan == plan_type && sub.is_enrolled())
                    .count() as u64,
            })
            .collect())
    }
}
