use models::{Job, JobStatus};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use super::{parse_tab, ViewContext};
use crate::client::{to_patch, EntityClient, Patch, SortSpec};
use crate::drafts::JobDraft;
use crate::errors::ServiceError;
use crate::views::customers::CustomerOption;
use crate::views::jobs::JobRow;
use crate::views::{ListView, SelectOption};

#[derive(Debug, Clone, Serialize)]
pub struct JobsPage {
    pub tab: String,
    pub tabs: Vec<SelectOption>,
    pub jobs: ListView<JobRow>,
    /// Choices for the job dialog's customer picker.
    pub customers: Vec<CustomerOption>,
}

fn tabs() -> Vec<SelectOption> {
    vec![
        SelectOption::new("all", "All Jobs"),
        SelectOption::new(JobStatus::Scheduled.as_str(), "Scheduled"),
        SelectOption::new(JobStatus::InProgress.as_str(), "In Progress"),
        SelectOption::new(JobStatus::Completed.as_str(), "Completed"),
    ]
}

#[instrument(skip_all)]
pub async fn load(client: &EntityClient, ctx: &ViewContext) -> Result<JobsPage, ServiceError> {
    let status = parse_tab::<JobStatus>(ctx.query.tab.as_deref())?;
    let by_scheduled = SortSpec::desc("scheduled_date");
    let (jobs, customers) = tokio::try_join!(
        client.jobs.list(Some(&by_scheduled), None),
        client.customers.list(None, None),
    )?;
    let rows = filter_by_status(&jobs, status).into_iter().map(JobRow::from).collect();
    Ok(JobsPage {
        tab: status.map(|s| s.as_str()).unwrap_or("all").to_string(),
        tabs: tabs(),
        jobs: ListView::new(rows, "No jobs found"),
        customers: customers.iter().map(CustomerOption::from).collect(),
    })
}

pub fn filter_by_status(jobs: &[Job], status: Option<JobStatus>) -> Vec<&Job> {
    jobs.iter().filter(|j| status.map_or(true, |s| j.status == s)).collect()
}

#[instrument(skip(client, draft, ctx))]
pub async fn save(client: &EntityClient, id: Option<&str>, draft: &JobDraft, ctx: &ViewContext) -> Result<JobsPage, ServiceError> {
    let input = draft.commit()?;
    let saved = match id {
        Some(id) => client.jobs.update(id, to_patch(&input)?).await?,
        None => client.jobs.create(&input).await?,
    };
    info!(event = "job_saved", job_id = %saved.id, status = %saved.status, "job saved");
    load(client, ctx).await
}

#[instrument(skip(client, ctx))]
pub async fn delete(client: &EntityClient, id: &str, ctx: &ViewContext) -> Result<JobsPage, ServiceError> {
    client.jobs.delete(id).await?;
    info!(event = "job_deleted", job_id = %id, "job deleted");
    load(client, ctx).await
}

/// Quick status action: only the status field is sent.
#[instrument(skip(client, ctx))]
pub async fn change_status(client: &EntityClient, id: &str, status: JobStatus, ctx: &ViewContext) -> Result<JobsPage, ServiceError> {
    let mut patch = Patch::new();
    patch.insert("status".into(), Value::String(status.as_str().to_string()));
    client.jobs.update(id, patch).await?;
    info!(event = "job_status_changed", job_id = %id, status = %status, "job status changed");
    load(client, ctx).await
}
