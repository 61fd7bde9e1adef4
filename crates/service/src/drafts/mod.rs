//! Dialog drafts: a local, uncommitted copy of a record that a form edits
//! field by field and hands to the page container on submit.
//!
//! Drafts carry raw form text (dates and amounts as strings); `commit()`
//! turns them into the backend input type, checking only the fields the
//! form marks as required plus the numeric/date coercions.

pub mod customer;
pub mod invoice;
pub mod job;
pub mod service_request;

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use models::errors::ModelError;

use crate::errors::ServiceError;

pub use customer::CustomerDraft;
pub use invoice::InvoiceDraft;
pub use job::JobDraft;
pub use service_request::ServiceRequestDraft;

/// Field-by-field editing, the way form inputs report changes.
pub trait FormDraft {
    fn set(&mut self, field: &str, value: &str) -> Result<(), ServiceError>;

    fn apply(&mut self, changes: &HashMap<String, String>) -> Result<(), ServiceError> {
        for (field, value) in changes {
            self.set(field, value)?;
        }
        Ok(())
    }
}

pub(crate) fn unknown_field(field: &str) -> ServiceError {
    ServiceError::Validation(format!("unknown field: {field}"))
}

/// Trimmed text, blank -> `None`.
pub(crate) fn text(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() { None } else { Some(v.to_string()) }
}

pub(crate) fn required(field: &str, value: &str) -> Result<String, ServiceError> {
    models::record::validate_required(field, value)?;
    Ok(value.trim().to_string())
}

pub(crate) fn parse_date(field: &str, value: &str) -> Result<Option<NaiveDate>, ServiceError> {
    let v = value.trim();
    if v.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(v, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ServiceError::Validation(format!("{field} must be a date (YYYY-MM-DD)")))
}

pub(crate) fn required_date(field: &str, value: &str) -> Result<NaiveDate, ServiceError> {
    parse_date(field, value)?.ok_or_else(|| ServiceError::Validation(format!("{field} is required")))
}

pub(crate) fn parse_enum<E: FromStr<Err = ModelError>>(value: &str) -> Result<E, ServiceError> {
    Ok(value.trim().parse::<E>()?)
}

/// Blank selects clear an optional enum.
pub(crate) fn parse_opt_enum<E: FromStr<Err = ModelError>>(value: &str) -> Result<Option<E>, ServiceError> {
    if value.trim().is_empty() { Ok(None) } else { parse_enum(value).map(Some) }
}

pub(crate) fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}
