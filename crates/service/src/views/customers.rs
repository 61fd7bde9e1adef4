use models::{Customer, CustomerStatus};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CustomerCard {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub service_address: String,
    pub email: Option<String>,
    pub property_size: Option<&'static str>,
    pub status: CustomerStatus,
    pub notes: Option<String>,
}

impl From<&Customer> for CustomerCard {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            phone: c.phone.clone(),
            service_address: c.service_address.clone(),
            email: c.email.clone(),
            property_size: c.property_size.map(|s| s.label()),
            status: c.status,
            notes: c.notes.clone(),
        }
    }
}

/// Customer choice in the job and invoice dialogs.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerOption {
    pub id: String,
    pub name: String,
    pub service_address: String,
}

impl From<&Customer> for CustomerOption {
    fn from(c: &Customer) -> Self {
        Self { id: c.id.clone(), name: c.name.clone(), service_address: c.service_address.clone() }
    }
}
