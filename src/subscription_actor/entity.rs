use super::actions::{SubscriptionAction, SubscriptionActionResult};
use crate::actor_framework::Entity;
use crate::domain::{
    NewSubscription, PaymentStatus, Subscription, SubscriptionChanges, SubscriptionId,
    SubscriptionStatus, Timestamp,
};

/// Payload for creating a subscription. The term starts at `start_date`
/// and runs for the plan's duration.
#[derive(Debug, Clone)]
pub struct SubscriptionCreate {
    pub subscription: NewSubscription,
    pub start_date: Timestamp,
}

fn check_price(price: f64) -> Result<(), String> {
    if price.is_nan() || price < 0.0 {
        return Err(format!("Invalid price: {price}"));
    }
    Ok(())
}

impl Entity for Subscription {
    type Id = SubscriptionId;
    type CreatePayload = SubscriptionCreate;
    type Patch = SubscriptionChanges;
    type Action = SubscriptionAction;
    type ActionResult = SubscriptionActionResult;

    const KIND: &'static str = "subscription";

    fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// New subscriptions are active with payment pending.
    fn from_create(id: SubscriptionId, payload: SubscriptionCreate) -> Result<Self, String> {
        let sub = payload.subscription;
        if sub.customer_name.trim().is_empty() || sub.customer_phone.trim().is_empty() {
            return Err("Customer name and phone are required".to_string());
        }
        check_price(sub.price)?;

        Ok(Self {
            id,
            customer_name: sub.customer_name,
            customer_phone: sub.customer_phone,
            plan: sub.plan,
            bowl_size: sub.bowl_size,
            price: sub.price,
            payment_status: PaymentStatus::Pending,
            status: SubscriptionStatus::Active,
            start_date: payload.start_date,
            end_date: payload.start_date.plus_days(sub.plan.duration_days()),
        })
    }

    fn on_update(&mut self, changes: SubscriptionChanges) -> Result<(), String> {
        check_price(changes.price)?;
        self.bowl_size = changes.bowl_size;
        self.price = changes.price;
        self.payment_status = changes.payment_status;
        Ok(())
    }

    fn handle_action(&mut self, action: SubscriptionAction) -> Result<SubscriptionActionResult, String> {
        match action {
            SubscriptionAction::SetStatus(target) => {
                if !self.status.can_set(target) {
                    return Err(format!(
                        "Cannot change subscription from {} to {}",
                        self.status, target
                    ));
                }
                self.status = target;
                Ok(SubscriptionActionResult::SetStatus(self.clone()))
            }
            SubscriptionAction::Expire { now } => {
                let due = self.status == SubscriptionStatus::Active && self.is_past_end(now);
                if due {
                    self.status = SubscriptionStatus::Expired;
                }
                Ok(SubscriptionActionResult::Expire(due))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BowlSize, SubscriptionPlan, NANOS_PER_DAY};

    fn weekly() -> Subscription {
        Subscription::from_create(
            1,
            SubscriptionCreate {
                subscription: NewSubscription {
                    customer_name: "Meera".into(),
                    customer_phone: "98450".into(),
                    plan: SubscriptionPlan::Weekly,
                    bowl_size: BowlSize::Medium,
                    price: 700.0,
                },
                start_date: Timestamp(0),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_term_follows_plan_duration() {
        let sub = weekly();
        assert_eq!(sub.end_date, Timestamp(7 * NANOS_PER_DAY));
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_only_active_past_end_expires() {
        let mut sub = weekly();
        let before_end = Timestamp(6 * NANOS_PER_DAY);
        let after_end = Timestamp(8 * NANOS_PER_DAY);

        assert_eq!(
            sub.handle_action(SubscriptionAction::Expire { now: before_end }),
            Ok(SubscriptionActionResult::Expire(false))
        );

        sub.handle_action(SubscriptionAction::SetStatus(SubscriptionStatus::Paused)).unwrap();
        assert_eq!(
            sub.handle_action(SubscriptionAction::Expire { now: after_end }),
            Ok(SubscriptionActionResult::Expire(false))
        );

        sub.handle_action(SubscriptionAction::SetStatus(SubscriptionStatus::Active)).unwrap();
        assert_eq!(
            sub.handle_action(SubscriptionAction::Expire { now: after_end }),
            Ok(SubscriptionActionResult::Expire(true))
        );
        assert!(sub
            .handle_action(SubscriptionAction::SetStatus(SubscriptionStatus::Active))
            .is_err());
    }
}
