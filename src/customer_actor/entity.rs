use crate::actor_framework::Entity;
use crate::domain::{Customer, CustomerFields, CustomerId};

fn check(fields: &CustomerFields) -> Result<(), String> {
    if fields.name.trim().is_empty() {
        return Err("Customer name is required".to_string());
    }
    if fields.mobile_no.trim().is_empty() {
        return Err("Mobile number is required".to_string());
    }
    Ok(())
}

impl Entity for Customer {
    type Id = CustomerId;
    type CreatePayload = CustomerFields;
    type Patch = CustomerFields;
    type Action = ();
    type ActionResult = ();

    const KIND: &'static str = "customer";

    fn id(&self) -> &CustomerId {
        &self.id
    }

    fn from_create(id: CustomerId, fields: CustomerFields) -> Result<Self, String> {
        check(&fields)?;
        Ok(Self {
            id,
            name: fields.name,
            mobile_no: fields.mobile_no,
            preferences: fields.preferences,
            address: fields.address,
        })
    }

    fn on_update(&mut self, fields: CustomerFields) -> Result<(), String> {
        check(&fields)?;
        self.name = fields.name;
        self.mobile_no = fields.mobile_no;
        self.preferences = fields.preferences;
        self.address = fields.address;
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
