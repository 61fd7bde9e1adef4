use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::customer::PropertySize;
use crate::job::ServiceType;
use crate::record::{empty_as_none, lenient_timestamp, null_as_default, wire_enum, Record};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimePreference {
    Morning,
    Afternoon,
    #[default]
    Flexible,
}

wire_enum!(TimePreference, "time_preference", {
    Morning => "morning",
    Afternoon => "afternoon",
    Flexible => "flexible",
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Reviewed,
    Scheduled,
    Completed,
    Cancelled,
}

wire_enum!(RequestStatus, "request status", {
    Pending => "pending",
    Reviewed => "reviewed",
    Scheduled => "scheduled",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl RequestStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending Review",
            RequestStatus::Reviewed => "Under Review",
            RequestStatus::Scheduled => "Scheduled",
            RequestStatus::Completed => "Completed",
            RequestStatus::Cancelled => "Cancelled",
        }
    }
}

/// Public intake submission. Contact fields are free text and need not match
/// an existing customer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub customer_email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub customer_phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_address: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub property_size: Option<PropertySize>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub service_type: Option<ServiceType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub preferred_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub time_preference: Option<TimePreference>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: RequestStatus,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub admin_notes: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub estimated_cost: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    /// Account email of the submitter when they were signed in.
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequestInput {
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: String,
    pub service_address: String,
    pub property_size: PropertySize,
    pub service_type: ServiceType,
    pub preferred_date: Option<NaiveDate>,
    pub time_preference: TimePreference,
    pub description: Option<String>,
    pub photos: Vec<String>,
    pub status: RequestStatus,
}

impl Record for ServiceRequest {
    type Input = ServiceRequestInput;
    const ENTITY: &'static str = "ServiceRequest";

    fn id(&self) -> &str { &self.id }
}
