use serde::{Deserialize, Serialize};

pub type CustomerId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub mobile_no: String,
    pub preferences: String,
    pub address: String,
}

impl Customer {
    /// Case-insensitive substring search over every text field. A blank
    /// query matches everyone.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [&self.name, &self.mobile_no, &self.address, &self.preferences]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerFields {
    pub name: String,
    pub mobile_no: String,
    pub preferences: String,
    pub address: String,
}
