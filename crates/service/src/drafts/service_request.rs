use chrono::NaiveDate;
use models::{record::validate_email, PropertySize, RequestStatus, ServiceRequestInput, ServiceType, TimePreference};
use serde::{Deserialize, Serialize};

use super::{parse_date, parse_enum, parse_opt_enum, required, text, unknown_field, FormDraft};
use crate::errors::ServiceError;

/// Public intake form. Photos are URLs already returned by the uploader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServiceRequestDraft {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service_address: String,
    pub property_size: PropertySize,
    pub service_type: Option<ServiceType>,
    pub preferred_date: String,
    pub time_preference: TimePreference,
    pub description: String,
    pub photos: Vec<String>,
}

impl ServiceRequestDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill contact fields from a signed-in account.
    pub fn for_user(user: &models::User) -> Self {
        Self {
            customer_name: user.full_name.clone().unwrap_or_default(),
            customer_email: user.email.clone(),
            customer_phone: user.phone.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn add_photos<I: IntoIterator<Item = String>>(&mut self, urls: I) {
        self.photos.extend(urls);
    }

    /// Out-of-range indexes are ignored.
    pub fn remove_photo(&mut self, index: usize) -> bool {
        if index < self.photos.len() {
            self.photos.remove(index);
            true
        } else {
            false
        }
    }

    /// New submissions always start as `pending`. The preferred date may
    /// not be before `today`.
    pub fn commit(&self, today: NaiveDate) -> Result<ServiceRequestInput, ServiceError> {
        let customer_email = text(&self.customer_email);
        if let Some(e) = &customer_email {
            validate_email(e)?;
        }
        let service_type = self
            .service_type
            .ok_or_else(|| ServiceError::Validation("service_type is required".into()))?;
        let preferred_date = parse_date("preferred_date", &self.preferred_date)?;
        if matches!(preferred_date, Some(d) if d < today) {
            return Err(ServiceError::Validation("preferred_date cannot be in the past".into()));
        }
        Ok(ServiceRequestInput {
            customer_name: required("customer_name", &self.customer_name)?,
            customer_email,
            customer_phone: required("customer_phone", &self.customer_phone)?,
            service_address: required("service_address", &self.service_address)?,
            property_size: self.property_size,
            service_type,
            preferred_date,
            time_preference: self.time_preference,
            description: text(&self.description),
            photos: self.photos.clone(),
            status: RequestStatus::Pending,
        })
    }
}

impl FormDraft for ServiceRequestDraft {
    fn set(&mut self, field: &str, value: &str) -> Result<(), ServiceError> {
        match field {
            "customer_name" => self.customer_name = value.to_string(),
            "customer_email" => self.customer_email = value.to_string(),
            "customer_phone" => self.customer_phone = value.to_string(),
            "service_address" => self.service_address = value.to_string(),
            "property_size" => self.property_size = parse_enum(value)?,
            "service_type" => self.service_type = parse_opt_enum(value)?,
            "preferred_date" => self.preferred_date = value.to_string(),
            "time_preference" => self.time_preference = parse_enum(value)?,
            "description" => self.description = value.to_string(),
            other => return Err(unknown_field(other)),
        }
        Ok(())
    }
}
