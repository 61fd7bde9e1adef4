use common::format;
use models::{RequestStatus, ServiceRequest};
use serde::Serialize;

/// One entry on the "My Requests" page.
#[derive(Debug, Clone, Serialize)]
pub struct RequestCard {
    pub id: String,
    pub title: String,
    pub status: RequestStatus,
    pub status_label: &'static str,
    pub service_address: String,
    /// Only present when the requester picked a date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_preference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub photos: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_on: Option<String>,
}

impl From<&ServiceRequest> for RequestCard {
    fn from(r: &ServiceRequest) -> Self {
        Self {
            id: r.id.clone(),
            title: r
                .service_type
                .map(|s| format::title_case(s.as_str()))
                .unwrap_or_else(|| "Service Request".to_string()),
            status: r.status,
            status_label: r.status.label(),
            service_address: r.service_address.clone(),
            preferred_date: r.preferred_date.map(format::long_date),
            time_preference: r.time_preference.map(|t| t.as_str().to_string()),
            estimated_cost: r.estimated_cost.map(format::currency),
            scheduled_date: r.scheduled_date.map(format::long_date),
            admin_notes: r.admin_notes.clone(),
            description: r.description.clone(),
            photos: r.photos.clone(),
            submitted_on: r.created_date.map(|ts| format!("Submitted on {}", format::local_timestamp(ts))),
        }
    }
}
