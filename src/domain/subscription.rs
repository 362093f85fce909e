use super::{Timestamp, NANOS_PER_DAY};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type SubscriptionId = u64;

/// Days before `end_date` during which a subscription counts as expiring.
pub const EXPIRING_WINDOW_DAYS: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Weekly,
    Monthly,
}

impl SubscriptionPlan {
    pub const ALL: [SubscriptionPlan; 2] = [SubscriptionPlan::Weekly, SubscriptionPlan::Monthly];

    pub fn bowls(self) -> u32 {
        match self {
            SubscriptionPlan::Weekly => 6,
            SubscriptionPlan::Monthly => 24,
        }
    }

    pub fn duration_days(self) -> i64 {
        match self {
            SubscriptionPlan::Weekly => 7,
            SubscriptionPlan::Monthly => 30,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SubscriptionPlan::Weekly => "Weekly · 6 bowls",
            SubscriptionPlan::Monthly => "Monthly · 24 bowls",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BowlSize {
    Small,
    Medium,
    Large,
}

impl BowlSize {
    pub fn label(self) -> &'static str {
        match self {
            BowlSize::Small => "Small",
            BowlSize::Medium => "Medium",
            BowlSize::Large => "Large",
        }
    }
}

/// Public price list shown on the subscribe page.
pub fn subscription_price(plan: SubscriptionPlan, size: BowlSize) -> f64 {
    match (plan, size) {
        (SubscriptionPlan::Weekly, BowlSize::Small) => 500.0,
        (SubscriptionPlan::Weekly, BowlSize::Medium) => 700.0,
        (SubscriptionPlan::Weekly, BowlSize::Large) => 900.0,
        (SubscriptionPlan::Monthly, BowlSize::Small) => 1800.0,
        (SubscriptionPlan::Monthly, BowlSize::Medium) => 2400.0,
        (SubscriptionPlan::Monthly, BowlSize::Large) => 3200.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Paused,
    Cancelled,
    Expired,
}

impl SubscriptionStatus {
    pub const ALL: [SubscriptionStatus; 4] = [
        SubscriptionStatus::Active,
        SubscriptionStatus::Paused,
        SubscriptionStatus::Cancelled,
        SubscriptionStatus::Expired,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::Paused => "Paused",
            SubscriptionStatus::Cancelled => "Cancelled",
            SubscriptionStatus::Expired => "Expired",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SubscriptionStatus::Cancelled | SubscriptionStatus::Expired)
    }

    /// Transitions an operator may request. Expiry is reached only through
    /// the time-based sweep, never set directly.
    pub fn can_set(self, target: SubscriptionStatus) -> bool {
        use SubscriptionStatus::*;
        match (self, target) {
            (from, to) if from == to => to != Expired,
            (Active, Paused) | (Paused, Active) => true,
            (Active, Cancelled) | (Paused, Cancelled) => true,
            _ => false,
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub customer_name: String,
    pub customer_phone: String,
    pub plan: SubscriptionPlan,
    pub bowl_size: BowlSize,
    pub price: f64,
    pub payment_status: PaymentStatus,
    pub status: SubscriptionStatus,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

impl Subscription {
    pub fn is_expiring_soon(&self, now: Timestamp) -> bool {
        let remaining = self.end_date - now;
        (0..=EXPIRING_WINDOW_DAYS * NANOS_PER_DAY).contains(&remaining)
    }

    pub fn is_past_end(&self, now: Timestamp) -> bool {
        self.end_date < now
    }

    /// Enrolled members are the ones not yet cancelled or expired.
    pub fn is_enrolled(&self) -> bool {
        !self.status.is_terminal()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub customer_name: String,
    pub customer_phone: String,
    pub plan: SubscriptionPlan,
    pub bowl_size: BowlSize,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionChanges {
    pub bowl_size: BowlSize,
    pub price: f64,
    pub payment_status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use SubscriptionStatus::*;

    #[test]
    fn test_price_table() {
        assert_eq!(subscription_price(SubscriptionPlan::Weekly, BowlSize::Medium), 700.0);
        assert_eq!(subscription_price(SubscriptionPlan::Monthly, BowlSize::Large), 3200.0);
    }

    #[test]
    fn test_operator_transitions() {
        assert!(Active.can_set(Paused));
        assert!(Paused.can_set(Active));
        assert!(Paused.can_set(Cancelled));
        assert!(!Active.can_set(Expired));
        assert!(!Cancelled.can_set(Active));
        assert!(!Expired.can_set(Paused));
        assert!(Cancelled.can_set(Cancelled));
    }

    #[test]
    fn test_expiring_window() {
        let sub = Subscription {
            id: 1,
            customer_name: "Ravi".into(),
            customer_phone: "99".into(),
            plan: SubscriptionPlan::Weekly,
            bowl_size: BowlSize::Small,
            price: 500.0,
            payment_status: PaymentStatus::Paid,
            status: Active,
            start_date: Timestamp(0),
            end_date: Timestamp(7 * NANOS_PER_DAY),
        };
        assert!(!sub.is_expiring_soon(Timestamp(4 * NANOS_PER_DAY)));
        assert!(sub.is_expiring_soon(Timestamp(5 * NANOS_PER_DAY)));
        assert!(sub.is_expiring_soon(Timestamp(7 * NANOS_PER_DAY)));
        assert!(!sub.is_expiring_soon(Timestamp(7 * NANOS_PER_DAY + 1)));
        assert!(sub.is_past_end(Timestamp(7 * NANOS_PER_DAY + 1)));
    }
}
