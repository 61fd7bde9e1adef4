use models::{Customer, Job, JobInput, JobStatus, ServiceType};
use serde::{Deserialize, Serialize};

use super::{date_text, parse_enum, parse_opt_enum, required, required_date, text, unknown_field, FormDraft};
use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobDraft {
    pub customer_id: String,
    pub customer_name: String,
    pub service_address: String,
    pub service_type: Option<ServiceType>,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub estimated_duration: Option<f64>,
    pub status: JobStatus,
    pub assigned_to: String,
    pub notes: String,
}

impl JobDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_record(j: &Job) -> Self {
        Self {
            customer_id: j.customer_id.clone(),
            customer_name: j.customer_name.clone(),
            service_address: j.service_address.clone(),
            service_type: j.service_type,
            scheduled_date: date_text(j.scheduled_date),
            scheduled_time: j.scheduled_time.clone().unwrap_or_default(),
            estimated_duration: j.estimated_duration,
            status: j.status,
            assigned_to: j.assigned_to.clone().unwrap_or_default(),
            notes: j.notes.clone().unwrap_or_default(),
        }
    }

    /// Picking a customer copies their name and service address into the
    /// draft. Unknown ids leave the draft as it was.
    pub fn select_customer(&mut self, customer_id: &str, customers: &[Customer]) -> Result<(), ServiceError> {
        let c = customers
            .iter()
            .find(|c| c.id == customer_id)
            .ok_or_else(|| ServiceError::not_found("Customer"))?;
        self.customer_id = c.id.clone();
        self.customer_name = c.name.clone();
        self.service_address = c.service_address.clone();
        Ok(())
    }

    pub fn commit(&self) -> Result<JobInput, ServiceError> {
        let customer_id = required("customer_id", &self.customer_id)?;
        let service_type = self
            .service_type
            .ok_or_else(|| ServiceError::Validation("service_type is required".into()))?;
        if let Some(hours) = self.estimated_duration {
            if !hours.is_finite() || hours < 0.0 {
                return Err(ServiceError::Validation("estimated_duration must be a non-negative number".into()));
            }
        }
        Ok(JobInput {
            customer_id,
            customer_name: self.customer_name.trim().to_string(),
            service_address: self.service_address.trim().to_string(),
            service_type,
            scheduled_date: required_date("scheduled_date", &self.scheduled_date)?,
            scheduled_time: text(&self.scheduled_time),
            estimated_duration: self.estimated_duration,
            status: self.status,
            assigned_to: text(&self.assigned_to),
            notes: text(&self.notes),
        })
    }
}

impl FormDraft for JobDraft {
    fn set(&mut self, field: &str, value: &str) -> Result<(), ServiceError> {
        match field {
            "customer_id" => self.customer_id = value.to_string(),
            "customer_name" => self.customer_name = value.to_string(),
            "service_address" => self.service_address = value.to_string(),
            "service_type" => self.service_type = parse_opt_enum(value)?,
            "scheduled_date" => self.scheduled_date = value.to_string(),
            "scheduled_time" => self.scheduled_time = value.to_string(),
            "estimated_duration" => {
                self.estimated_duration = match value.trim() {
                    "" => None,
                    v => Some(v.parse::<f64>().map_err(|_| {
                        ServiceError::Validation("estimated_duration must be a number".into())
                    })?),
                }
            }
            "status" => self.status = parse_enum(value)?,
            "assigned_to" => self.assigned_to = value.to_string(),
            "notes" => self.notes = value.to_string(),
            other => return Err(unknown_field(other)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn customer() -> Customer {
        serde_json::from_value(serde_json::json!({
            "id": "c1", "name": "Ann Lee", "phone": "555", "service_address": "1 Elm St"
        }))
        .unwrap()
    }

    #[test]
    fn selecting_customer_copies_name_and_address() {
        let mut d = JobDraft::new();
        d.select_customer("c1", &[customer()]).unwrap();
        assert_eq!(d.customer_name, "Ann Lee");
        assert_eq!(d.service_address, "1 Elm St");
        assert!(d.select_customer("missing", &[customer()]).is_err());
        assert_eq!(d.customer_id, "c1");
    }

    #[test]
    fn commit_needs_customer_type_and_date() {
        let mut d = JobDraft::new();
        assert!(d.commit().is_err());
        d.select_customer("c1", &[customer()]).unwrap();
        d.set("service_type", "mowing").unwrap();
        assert!(d.commit().is_err());
        d.set("scheduled_date", "2024-06-15").unwrap();
        d.set("estimated_duration", "2.5").unwrap();
        let input = d.commit().unwrap();
        assert_eq!(input.scheduled_date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(input.status, JobStatus::Scheduled);
        assert_eq!(input.estimated_duration, Some(2.5));
    }

    #[test]
    fn bad_duration_is_rejected() {
        let mut d = JobDraft::new();
        assert!(d.set("estimated_duration", "two").is_err());
        d.set("estimated_duration", "").unwrap();
        assert_eq!(d.estimated_duration, None);
    }
}
