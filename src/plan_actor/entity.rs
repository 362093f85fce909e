use crate::actor_framework::Entity;
use crate::domain::{Plan, PlanFields, PlanId};

fn check(fields: &PlanFields) -> Result<(), String> {
    if fields.name.trim().is_empty() {
        return Err("Plan name is required".to_string());
    }
    let prices = [fields.price_250gm, fields.price_350gm, fields.price_500gm];
    if prices.iter().any(|p| p.is_nan() || *p < 0.0) {
        return Err("Plan prices must be non-negative".to_string());
    }
    Ok(())
}

impl Entity for Plan {
    type Id = PlanId;
    type CreatePayload = PlanFields;
    type Patch = PlanFields;
    type Action = ();
    type ActionResult = ();

    const KIND: &'static str = "plan";

    fn id(&self) -> &PlanId {
        &self.id
    }

    fn from_create(id: PlanId, fields: PlanFields) -> Result<Self, String> {
        check(&fields)?;
        Ok(Self {
            id,
            name: fields.name,
            plan_type: fields.plan_type,
            price_250gm: fields.price_250gm,
            price_350gm: fields.price_350gm,
            price_500gm: fields.price_500gm,
            is_active: fields.is_active,
        })
    }

    fn on_update(&mut self, fields: PlanFields) -> Result<(), String> {
        *self = Self::from_create(self.id, fields)?;
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
