use crate::domain::{Subscription, SubscriptionStatus, Timestamp};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTab {
    #[default]
    All,
    Active,
    Paused,
    Expired,
    Cancelled,
}

impl SubscriptionTab {
    pub fn shows(self, subscription: &Subscription) -> bool {
        match self {
            SubscriptionTab::All => true,
            SubscriptionTab::Active => subscription.status == SubscriptionStatus::Active,
            SubscriptionTab::Paused => subscription.status == SubscriptionStatus::Paused,
            SubscriptionTab::Expired => subscription.status == SubscriptionStatus::Expired,
            SubscriptionTab::Cancelled => subscription.status == SubscriptionStatus::Cancelled,
        }
    }
}

pub fn filter_subscriptions(subscriptions: &[Subscription], tab: SubscriptionTab) -> Vec<&Subscription> {
    subscriptions.iter().filter(|sub| tab.shows(sub)).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub active: usize,
    pub paused: usize,
    pub cancelled: usize,
    pub expired: usize,
}

pub fn status_counts(subscriptions: &[Subscription]) -> StatusCounts {
    subscriptions
        .iter()
        .fold(StatusCounts::default(), |mut counts, sub| {
            match sub.status {
                SubscriptionStatus::Active => counts.active += 1,
                SubscriptionStatus::Paused => counts.paused += 1,
                SubscriptionStatus::Cancelled => counts.cancelled += 1,
                SubscriptionStatus::Expired => counts.expired += 1,
            }
            counts
        })
}

/// Active subscriptions ending within the alert window, soonest first.
pub fn expiring_soon(subscriptions: &[Subscription], now: Timestamp) -> Vec<&Subscription> {
    let mut expiring: Vec<&Subscription> = subscriptions
        .iter()
        .filter(|sub| sub.status == SubscriptionStatus::Active && sub.is_expiring_soon(now))
        .collect();
    expiring.sort_by_key(|sub| sub.end_date);
    expiring
}

/// Operator actions offered on a subscription row.
pub fn status_actions(status: SubscriptionStatus) -> Vec<SubscriptionStatus> {
    [SubscriptionStatus::Active, SubscriptionStatus::Paused, SubscriptionStatus::Cancelled]
        .into_iter()
        .filter(|target| *target != status && status.can_set(*target))
        .collect()
}
