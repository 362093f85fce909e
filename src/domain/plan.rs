use super::SubscriptionPlan;
use serde::{Deserialize, Serialize};

pub type PlanId = u64;

/// A subscription plan offered to customers, priced per bowl weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    pub plan_type: SubscriptionPlan,
    pub price_250gm: f64,
    pub price_350gm: f64,
    pub price_500gm: f64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanFields {
    pub name: String,
    pub plan_type: SubscriptionPlan,
    pub price_250gm: f64,
    pub price_350gm: f64,
    pub price_500gm: f64,
    pub is_active: bool,
}

/// Members currently enrolled (active or paused) on a plan type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEnrollment {
    pub plan_type: SubscriptionPlan,
    pub enrolled: u64,
}
