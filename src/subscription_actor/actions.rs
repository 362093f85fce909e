use crate::domain::{Subscription, SubscriptionStatus, Timestamp};

/// Custom actions for subscriptions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubscriptionAction {
    /// Pause, resume or cancel.
    SetStatus(SubscriptionStatus),
    /// Expires an active subscription whose end date has passed.
    Expire { now: Timestamp },
}

/// Results from SubscriptionActions - variants match 1:1 with SubscriptionAction
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionActionResult {
    SetStatus(Subscription),
    /// Whether the subscription was expired by this call.
    Expire(bool),
}
