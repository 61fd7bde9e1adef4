use chrono::NaiveDate;
use common::format;
use models::{Job, JobStatus};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct JobRow {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub service_address: String,
    pub service_label: String,
    pub scheduled_date: Option<NaiveDate>,
    pub date_label: Option<String>,
    pub scheduled_time: Option<String>,
    pub duration_label: Option<String>,
    pub status: JobStatus,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    /// Status changes offered as quick actions.
    pub next_statuses: Vec<JobStatus>,
}

impl From<&Job> for JobRow {
    fn from(j: &Job) -> Self {
        Self {
            id: j.id.clone(),
            customer_id: j.customer_id.clone(),
            customer_name: j.customer_name.clone(),
            service_address: j.service_address.clone(),
            service_label: service_label(j),
            scheduled_date: j.scheduled_date,
            date_label: j.scheduled_date.map(format::long_date),
            scheduled_time: j.scheduled_time.clone(),
            duration_label: j.estimated_duration.map(duration_label),
            status: j.status,
            assigned_to: j.assigned_to.clone(),
            notes: j.notes.clone(),
            next_statuses: next_statuses(j.status),
        }
    }
}

pub fn service_label(j: &Job) -> String {
    j.service_type.map(|s| s.humanized()).unwrap_or_else(|| "service".to_string())
}

pub fn duration_label(hours: f64) -> String {
    if hours == 1.0 { "1 hr".to_string() } else { format!("{hours} hrs") }
}

fn next_statuses(status: JobStatus) -> Vec<JobStatus> {
    match status {
        JobStatus::Scheduled => vec![JobStatus::InProgress, JobStatus::Completed, JobStatus::Cancelled],
        JobStatus::InProgress => vec![JobStatus::Completed],
        JobStatus::Completed | JobStatus::Cancelled => Vec::new(),
    }
}

/// Dashboard "upcoming jobs" entry.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingJobItem {
    pub id: String,
    pub customer_name: String,
    pub service_address: String,
    pub service_label: String,
    pub date_label: Option<String>,
    pub duration_label: Option<String>,
    pub status: JobStatus,
}

impl UpcomingJobItem {
    pub fn new(j: &Job, today: NaiveDate) -> Self {
        Self {
            id: j.id.clone(),
            customer_name: j.customer_name.clone(),
            service_address: j.service_address.clone(),
            service_label: service_label(j),
            date_label: j.scheduled_date.map(|d| format::relative_day(d, today)),
            duration_label: j.estimated_duration.map(duration_label),
            status: j.status,
        }
    }
}

/// Job choice in the invoice dialog, e.g. `mowing - 2024-06-15`.
#[derive(Debug, Clone, Serialize)]
pub struct JobOption {
    pub id: String,
    pub customer_id: String,
    pub label: String,
}

impl From<&Job> for JobOption {
    fn from(j: &Job) -> Self {
        let service = j.service_type.map(|s| s.as_str()).unwrap_or("other");
        let date = j.scheduled_date.map(|d| d.to_string()).unwrap_or_default();
        Self { id: j.id.clone(), customer_id: j.customer_id.clone(), label: format!("{service} - {date}") }
    }
}
