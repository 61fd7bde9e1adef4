use chrono::NaiveDate;
use futures::future::try_join_all;
use models::{PropertySize, ServiceType, TimePreference};
use serde::Serialize;
use tracing::{debug, info, instrument};

use super::ViewContext;
use crate::client::{EntityClient, UploadFile};
use crate::drafts::ServiceRequestDraft;
use crate::errors::ServiceError;
use crate::routing::Page;
use crate::views::requests::RequestCard;
use crate::views::SelectOption;

#[derive(Debug, Clone, Serialize)]
pub struct RequestServicePage {
    pub draft: ServiceRequestDraft,
    /// Earliest date the preferred-date picker offers.
    pub min_preferred_date: NaiveDate,
    pub service_types: Vec<SelectOption>,
    pub property_sizes: Vec<SelectOption>,
    pub time_preferences: Vec<SelectOption>,
}

/// Returned after a successful submission; the front end moves on to
/// `next_url`.
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedRequest {
    pub request: RequestCard,
    pub next_url: String,
}

/// Blank intake form, prefilled with the viewer's contact details when
/// they are signed in. Anonymous viewers get the plain form.
#[instrument(skip_all)]
pub async fn load(client: &EntityClient, ctx: &ViewContext) -> RequestServicePage {
    let draft = match client.auth.me().await {
        Ok(user) => ServiceRequestDraft::for_user(&user),
        Err(e) => {
            debug!(error = %e, "request form without viewer");
            ServiceRequestDraft::new()
        }
    };
    RequestServicePage {
        draft,
        min_preferred_date: ctx.today,
        service_types: ServiceType::ALL.iter().map(|s| SelectOption::new(s.as_str(), service_type_label(*s))).collect(),
        property_sizes: PropertySize::ALL.iter().map(|s| SelectOption::new(s.as_str(), property_size_label(*s))).collect(),
        time_preferences: TimePreference::ALL
            .iter()
            .map(|t| SelectOption::new(t.as_str(), time_preference_label(*t)))
            .collect(),
    }
}

fn service_type_label(s: ServiceType) -> String {
    match s {
        ServiceType::TreeService => "Tree & Shrub Care".to_string(),
        ServiceType::LandscapeInstallation => "Landscape Design & Installation".to_string(),
        other => common::format::title_case(other.as_str()),
    }
}

fn property_size_label(s: PropertySize) -> &'static str {
    match s {
        PropertySize::Small => "Small (< 1/4 acre)",
        PropertySize::Medium => "Medium (1/4 - 1/2 acre)",
        PropertySize::Large => "Large (1/2 - 1 acre)",
        PropertySize::ExtraLarge => "Extra Large (> 1 acre)",
    }
}

fn time_preference_label(t: TimePreference) -> &'static str {
    match t {
        TimePreference::Morning => "Morning (7am - 12pm)",
        TimePreference::Afternoon => "Afternoon (12pm - 6pm)",
        TimePreference::Flexible => "Flexible",
    }
}

/// Upload every file concurrently. Fails as a whole if any upload fails;
/// URLs come back in the order the files were given.
#[instrument(skip_all, fields(count = files.len()))]
pub async fn upload_photos(client: &EntityClient, files: Vec<UploadFile>) -> Result<Vec<String>, ServiceError> {
    let uploads = files.into_iter().map(|f| client.files.upload(f));
    let done = try_join_all(uploads).await?;
    info!(event = "photos_uploaded", count = done.len(), "photos uploaded");
    Ok(done.into_iter().map(|u| u.file_url).collect())
}

#[instrument(skip_all)]
pub async fn submit(
    client: &EntityClient,
    draft: &ServiceRequestDraft,
    ctx: &ViewContext,
) -> Result<SubmittedRequest, ServiceError> {
    let input = draft.commit(ctx.today)?;
    let created = client.service_requests.create(&input).await?;
    info!(event = "service_request_submitted", request_id = %created.id, service_type = %input.service_type, "service request submitted");
    Ok(SubmittedRequest { request: RequestCard::from(&created), next_url: Page::MyRequests.url() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{memory::MemoryBackend, Backend};
    use crate::drafts::FormDraft;
    use crate::pages::fixtures::{day, user};

    fn photo(name: &str, bytes: Vec<u8>) -> UploadFile {
        UploadFile { file_name: name.into(), content_type: Some("image/jpeg".into()), bytes }
    }

    #[tokio::test]
    async fn form_prefills_for_signed_in_viewer() {
        let backend = MemoryBackend::new(false);
        let token = backend.sign_in(user("sam@example.com", Some("555-0101"))).await;
        let ctx = ViewContext::new(day(2024, 6, 15));

        let page = load(&backend.client(Some(token)), &ctx).await;
        assert_eq!(page.draft.customer_email, "sam@example.com");
        assert_eq!(page.draft.customer_phone, "555-0101");
        assert_eq!(page.service_types.len(), 12);
        assert_eq!(page.min_preferred_date, ctx.today);

        let anonymous = load(&backend.client(None), &ctx).await;
        assert_eq!(anonymous.draft, ServiceRequestDraft::new());
    }

    #[tokio::test]
    async fn uploads_keep_order_and_fail_together() -> Result<(), ServiceError> {
        let backend = MemoryBackend::new(false);
        let client = backend.client(None);
        let urls = upload_photos(&client, vec![photo("a.jpg", vec![1]), photo("b.jpg", vec![2])]).await?;
        assert_eq!(urls.len(), 2);
        assert!(urls[0].ends_with("/a.jpg"));
        assert!(urls[1].ends_with("/b.jpg"));

        let err = upload_photos(&client, vec![photo("c.jpg", vec![3]), photo("empty.jpg", Vec::new())]).await;
        assert!(matches!(err, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn submit_creates_pending_request() -> Result<(), ServiceError> {
        let backend = MemoryBackend::new(false);
        let client = backend.client(None);
        let mut draft = ServiceRequestDraft::new();
        draft.set("customer_name", "Sam")?;
        draft.set("customer_phone", "555-0101")?;
        draft.set("service_address", "9 Oak Ave")?;
        draft.set("service_type", "mowing")?;
        draft.add_photos(upload_photos(&client, vec![photo("yard.jpg", vec![9])]).await?);

        let done = submit(&client, &draft, &ViewContext::new(day(2024, 6, 15))).await?;
        assert_eq!(done.request.status_label, "Pending Review");
        assert_eq!(done.request.photos.len(), 1);
        assert_eq!(done.next_url, "/MyRequests");
        assert_eq!(backend.service_requests.len().await, 1);
        Ok(())
    }
}
