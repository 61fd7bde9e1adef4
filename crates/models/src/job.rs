use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{empty_as_none, lenient_timestamp, null_as_default, wire_enum, Record};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Mowing,
    Trimming,
    Mulching,
    LeafRemoval,
    SpringCleanup,
    FallCleanup,
    Aeration,
    Seeding,
    LandscapeInstallation,
    TreeService,
    Consultation,
    Other,
}

wire_enum!(ServiceType, "service_type", {
    Mowing => "mowing",
    Trimming => "trimming",
    Mulching => "mulching",
    LeafRemoval => "leaf_removal",
    SpringCleanup => "spring_cleanup",
    FallCleanup => "fall_cleanup",
    Aeration => "aeration",
    Seeding => "seeding",
    LandscapeInstallation => "landscape_installation",
    TreeService => "tree_service",
    Consultation => "consultation",
    Other => "other",
});

impl ServiceType {
    /// `leaf removal`
    pub fn humanized(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

wire_enum!(JobStatus, "job status", {
    Scheduled => "scheduled",
    InProgress => "in_progress",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl JobStatus {
    /// Still on the schedule: not finished and not called off.
    pub fn is_open(&self) -> bool {
        matches!(self, JobStatus::Scheduled | JobStatus::InProgress)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_address: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub service_type: Option<ServiceType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub scheduled_time: Option<String>,
    /// Hours.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub estimated_duration: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: JobStatus,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub assigned_to: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobInput {
    pub customer_id: String,
    pub customer_name: String,
    pub service_address: String,
    pub service_type: ServiceType,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: Option<String>,
    pub estimated_duration: Option<f64>,
    pub status: JobStatus,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
}

impl Record for Job {
    type Input = JobInput;
    const ENTITY: &'static str = "Job";

    fn id(&self) -> &str { &self.id }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_job_dates() {
        let j: Job = serde_json::from_value(serde_json::json!({
            "id": "j1",
            "customer_id": "c1",
            "customer_name": "Ann",
            "service_type": "leaf_removal",
            "scheduled_date": "2024-06-15",
            "estimated_duration": 2.5,
            "status": "in_progress"
        }))
        .unwrap();
        assert_eq!(j.scheduled_date, NaiveDate::from_ymd_opt(2024, 6, 15));
        assert_eq!(j.service_type.unwrap().humanized(), "leaf removal");
        assert!(j.status.is_open());
    }

    #[test]
    fn blank_schedule_is_none() {
        let j: Job = serde_json::from_value(serde_json::json!({
            "id": "j2", "scheduled_date": "", "service_type": null
        }))
        .unwrap();
        assert_eq!(j.scheduled_date, None);
        assert_eq!(j.service_type, None);
        assert_eq!(j.status, JobStatus::Scheduled);
    }

    #[test]
    fn null_status_is_scheduled() {
        let j: Job = serde_json::from_value(serde_json::json!({
            "id": "j3", "customer_name": null, "status": null, "created_date": "2024-06-15 08:00:00"
        }))
        .unwrap();
        assert_eq!(j.status, JobStatus::Scheduled);
        assert_eq!(j.customer_name, "");
        assert!(j.created_date.is_some());
    }
}
