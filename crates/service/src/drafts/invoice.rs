use chrono::NaiveDate;
use models::{Customer, Invoice, InvoiceInput, Job, PaymentMethod, PaymentStatus};
use serde::{Deserialize, Deserializer, Serialize};

use super::{date_text, parse_date, parse_enum, parse_opt_enum, required, required_date, text, unknown_field, FormDraft};
use crate::errors::ServiceError;

/// Invoice dialog state. `amount` stays raw text until commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InvoiceDraft {
    pub customer_id: String,
    pub customer_name: String,
    pub job_id: String,
    pub invoice_number: String,
    pub invoice_date: String,
    pub due_date: String,
    pub service_description: String,
    #[serde(deserialize_with = "amount_text")]
    pub amount: String,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub paid_date: String,
    pub notes: String,
}

impl InvoiceDraft {
    /// Blank form dated `today`, unpaid.
    pub fn new(today: NaiveDate) -> Self {
        Self { invoice_date: today.to_string(), ..Self::default() }
    }

    pub fn from_record(i: &Invoice) -> Self {
        Self {
            customer_id: i.customer_id.clone(),
            customer_name: i.customer_name.clone(),
            job_id: i.job_id.clone().unwrap_or_default(),
            invoice_number: i.invoice_number.clone().unwrap_or_default(),
            invoice_date: date_text(i.invoice_date),
            due_date: date_text(i.due_date),
            service_description: i.service_description.clone().unwrap_or_default(),
            amount: i.amount.to_string(),
            payment_status: i.payment_status,
            payment_method: i.payment_method,
            paid_date: date_text(i.paid_date),
            notes: i.notes.clone().unwrap_or_default(),
        }
    }

    pub fn select_customer(&mut self, customer_id: &str, customers: &[Customer]) -> Result<(), ServiceError> {
        let c = customers
            .iter()
            .find(|c| c.id == customer_id)
            .ok_or_else(|| ServiceError::not_found("Customer"))?;
        if self.customer_id != c.id {
            // a job from another customer no longer applies
            self.job_id.clear();
        }
        self.customer_id = c.id.clone();
        self.customer_name = c.name.clone();
        Ok(())
    }

    /// Linking a job fills the description from its service type.
    pub fn select_job(&mut self, job_id: &str, jobs: &[Job]) -> Result<(), ServiceError> {
        let j = jobs
            .iter()
            .find(|j| j.id == job_id)
            .ok_or_else(|| ServiceError::not_found("Job"))?;
        self.job_id = j.id.clone();
        if let Some(service) = j.service_type {
            self.service_description = service.humanized();
        }
        Ok(())
    }

    /// Jobs offered in the job picker: only the selected customer's.
    pub fn jobs_for_customer<'a>(&self, jobs: &'a [Job]) -> Vec<&'a Job> {
        if self.customer_id.is_empty() {
            return Vec::new();
        }
        jobs.iter().filter(|j| j.customer_id == self.customer_id).collect()
    }

    pub fn shows_payment_method(&self) -> bool {
        self.payment_status != PaymentStatus::Unpaid
    }

    pub fn shows_paid_date(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    /// Hidden payment fields are dropped rather than sent.
    pub fn commit(&self) -> Result<InvoiceInput, ServiceError> {
        let customer_id = required("customer_id", &self.customer_id)?;
        let amount = parse_amount(&self.amount)?;
        let payment_method = if self.shows_payment_method() { self.payment_method } else { None };
        let paid_date = if self.shows_paid_date() { parse_date("paid_date", &self.paid_date)? } else { None };
        Ok(InvoiceInput {
            customer_id,
            customer_name: self.customer_name.trim().to_string(),
            job_id: text(&self.job_id),
            invoice_number: text(&self.invoice_number),
            invoice_date: required_date("invoice_date", &self.invoice_date)?,
            due_date: parse_date("due_date", &self.due_date)?,
            service_description: text(&self.service_description),
            amount,
            payment_status: self.payment_status,
            payment_method,
            paid_date,
            notes: text(&self.notes),
        })
    }
}

/// Number inputs may arrive as JSON numbers or as text.
fn amount_text<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(de)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("amount must be a number or text, got {other}"))),
    }
}

fn parse_amount(raw: &str) -> Result<f64, ServiceError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ServiceError::Validation("amount is required".into()));
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ServiceError::Validation(format!("amount must be a number, got {raw:?}"))),
    }
}

impl FormDraft for InvoiceDraft {
    fn set(&mut self, field: &str, value: &str) -> Result<(), ServiceError> {
        match field {
            "customer_id" => self.customer_id = value.to_string(),
            "customer_name" => self.customer_name = value.to_string(),
            "job_id" => self.job_id = value.to_string(),
            "invoice_number" => self.invoice_number = value.to_string(),
            "invoice_date" => self.invoice_date = value.to_string(),
            "due_date" => self.due_date = value.to_string(),
            "service_description" => self.service_description = value.to_string(),
            "amount" => self.amount = value.to_string(),
            "payment_status" => self.payment_status = parse_enum(value)?,
            "payment_method" => self.payment_method = parse_opt_enum(value)?,
            "paid_date" => self.paid_date = value.to_string(),
            "notes" => self.notes = value.to_string(),
            other => return Err(unknown_field(other)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::ServiceType;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn customers() -> Vec<Customer> {
        serde_json::from_value(serde_json::json!([
            {"id": "c1", "name": "Ann", "phone": "1", "service_address": "a"},
            {"id": "c2", "name": "Bob", "phone": "2", "service_address": "b"}
        ]))
        .unwrap()
    }

    fn jobs() -> Vec<Job> {
        serde_json::from_value(serde_json::json!([
            {"id": "j1", "customer_id": "c1", "service_type": "leaf_removal", "scheduled_date": "2024-06-01"},
            {"id": "j2", "customer_id": "c2", "service_type": "mowing", "scheduled_date": "2024-06-02"},
            {"id": "j3", "customer_id": "c1", "service_type": "mowing", "scheduled_date": "2024-06-03"}
        ]))
        .unwrap()
    }

    #[test]
    fn new_defaults_to_today_unpaid() {
        let d = InvoiceDraft::new(today());
        assert_eq!(d.invoice_date, "2024-06-15");
        assert_eq!(d.payment_status, PaymentStatus::Unpaid);
        assert!(!d.shows_payment_method());
        assert!(!d.shows_paid_date());
    }

    #[test]
    fn job_picker_filters_by_customer_and_fills_description() {
        let mut d = InvoiceDraft::new(today());
        assert!(d.jobs_for_customer(&jobs()).is_empty());
        d.select_customer("c1", &customers()).unwrap();
        let all = jobs();
        let offered: Vec<_> = d.jobs_for_customer(&all).iter().map(|j| j.id.as_str()).collect();
        assert_eq!(offered, ["j1", "j3"]);

        d.select_job("j1", &all).unwrap();
        assert_eq!(d.service_description, "leaf removal");
        assert_eq!(all[0].service_type, Some(ServiceType::LeafRemoval));

        d.select_customer("c2", &customers()).unwrap();
        assert!(d.job_id.is_empty());
    }

    #[test]
    fn commit_parses_amount_and_drops_hidden_payment_fields() {
        let mut d = InvoiceDraft::new(today());
        d.select_customer("c1", &customers()).unwrap();
        d.set("amount", "120.50").unwrap();
        d.set("payment_method", "cash").unwrap();
        d.set("paid_date", "2024-06-20").unwrap();
        let unpaid = d.commit().unwrap();
        assert_eq!(unpaid.amount, 120.5);
        assert_eq!(unpaid.payment_method, None);
        assert_eq!(unpaid.paid_date, None);

        d.set("payment_status", "partial").unwrap();
        let partial = d.commit().unwrap();
        assert_eq!(partial.payment_method, Some(PaymentMethod::Cash));
        assert_eq!(partial.paid_date, None);

        d.set("payment_status", "paid").unwrap();
        assert_eq!(d.commit().unwrap().paid_date, NaiveDate::from_ymd_opt(2024, 6, 20));
    }

    #[test]
    fn amount_accepts_json_numbers() {
        let d: InvoiceDraft = serde_json::from_value(serde_json::json!({"customer_id": "c1", "amount": 42.5})).unwrap();
        assert_eq!(d.amount, "42.5");
        let d: InvoiceDraft = serde_json::from_value(serde_json::json!({"customer_id": "c1"})).unwrap();
        assert_eq!(d.amount, "");
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let mut d = InvoiceDraft::new(today());
        d.customer_id = "c1".into();
        d.amount = "12abc".into();
        assert!(matches!(d.commit(), Err(ServiceError::Validation(_))));
        d.amount = "NaN".into();
        assert!(d.commit().is_err());
    }
}
