use models::{record::validate_email, Customer, CustomerInput, CustomerStatus, PropertySize};
use serde::{Deserialize, Serialize};

use super::{parse_enum, required, text, unknown_field, FormDraft};
use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_address: String,
    pub property_size: PropertySize,
    pub notes: String,
    pub status: CustomerStatus,
}

impl CustomerDraft {
    /// Blank form: medium lot, active.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_record(c: &Customer) -> Self {
        Self {
            name: c.name.clone(),
            email: c.email.clone().unwrap_or_default(),
            phone: c.phone.clone(),
            service_address: c.service_address.clone(),
            property_size: c.property_size.unwrap_or_default(),
            notes: c.notes.clone().unwrap_or_default(),
            status: c.status,
        }
    }

    pub fn commit(&self) -> Result<CustomerInput, ServiceError> {
        let email = text(&self.email);
        if let Some(e) = &email {
            validate_email(e)?;
        }
        Ok(CustomerInput {
            name: required("name", &self.name)?,
            email,
            phone: required("phone", &self.phone)?,
            service_address: required("service_address", &self.service_address)?,
            property_size: self.property_size,
            notes: text(&self.notes),
            status: self.status,
        })
    }
}

impl FormDraft for CustomerDraft {
    fn set(&mut self, field: &str, value: &str) -> Result<(), ServiceError> {
        match field {
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            "phone" => self.phone = value.to_string(),
            "service_address" => self.service_address = value.to_string(),
            "property_size" => self.property_size = parse_enum(value)?,
            "notes" => self.notes = value.to_string(),
            "status" => self.status = parse_enum(value)?,
            other => return Err(unknown_field(other)),
        }
        Ok(())
    }
}
