use models::{ServiceRequest, User};
use serde::Serialize;
use tracing::{info, instrument};

use super::ViewContext;
use crate::client::{EntityClient, SortSpec};
use crate::errors::ServiceError;
use crate::routing::Page;
use crate::views::requests::RequestCard;
use crate::views::ListView;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MyRequestsPage {
    Requests {
        viewer: String,
        requests: ListView<RequestCard>,
        new_request_url: String,
    },
    /// No signed-in viewer. Nothing is listed.
    AuthenticationRequired { message: &'static str },
}

impl MyRequestsPage {
    pub fn requires_auth(&self) -> bool {
        matches!(self, MyRequestsPage::AuthenticationRequired { .. })
    }
}

#[instrument(skip_all)]
pub async fn load(client: &EntityClient, _ctx: &ViewContext) -> Result<MyRequestsPage, ServiceError> {
    let user = match client.auth.me().await {
        Ok(user) => user,
        Err(e) if e.is_auth() => {
            info!(event = "my_requests_unauthenticated", "viewer not signed in");
            return Ok(MyRequestsPage::AuthenticationRequired { message: "Sign in to see your service requests" });
        }
        Err(e) => return Err(e),
    };
    let all = client.service_requests.list(Some(&SortSpec::desc("created_date")), None).await?;
    let mine = all.iter().filter(|r| belongs_to(r, &user)).map(RequestCard::from).collect();
    Ok(MyRequestsPage::Requests {
        viewer: user.email,
        requests: ListView::new(mine, "No Requests Yet"),
        new_request_url: Page::RequestService.url(),
    })
}

/// A request is the viewer's when its contact email or phone matches the
/// account, or when the viewer submitted it while signed in.
pub fn belongs_to(req: &ServiceRequest, user: &User) -> bool {
    let email_match = req
        .customer_email
        .as_deref()
        .is_some_and(|e| e.trim().eq_ignore_ascii_case(user.email.trim()));
    let phone_match = matches!((req.customer_phone.as_deref(), user.phone.as_deref()), (Some(a), Some(b)) if a.trim() == b.trim());
    let creator_match = req.created_by.as_deref().is_some_and(|c| c.eq_ignore_ascii_case(&user.email));
    email_match || phone_match || creator_match
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{memory::MemoryBackend, Backend};
    use crate::drafts::{FormDraft, ServiceRequestDraft};
    use crate::pages::fixtures::{day, request, user};
    use crate::pages::request_service;

    #[test]
    fn ownership_rules() {
        let viewer = user("sam@example.com", Some("555-0101"));
        assert!(belongs_to(&request("r1", Some("SAM@example.com"), "000"), &viewer));
        assert!(belongs_to(&request("r2", None, "555-0101"), &viewer));
        assert!(!belongs_to(&request("r3", Some("other@example.com"), "999"), &viewer));

        let mut by_viewer = request("r4", None, "123");
        by_viewer.created_by = Some("sam@example.com".into());
        assert!(belongs_to(&by_viewer, &viewer));

        let no_phone = user("x@example.com", None);
        assert!(!belongs_to(&request("r5", None, ""), &no_phone));
    }

    #[tokio::test]
    async fn anonymous_viewer_sees_nothing() -> Result<(), ServiceError> {
        let backend = MemoryBackend::new(false);
        backend.service_requests.seed(vec![request("r1", Some("sam@example.com"), "555")]).await?;
        let page = load(&backend.client(None), &ViewContext::new(day(2024, 6, 15))).await?;
        assert!(page.requires_auth());
        let json = serde_json::to_value(&page)?;
        assert_eq!(json["state"], "authentication_required");
        assert!(json.get("requests").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn submitted_mowing_request_lists_as_pending_without_date() -> Result<(), ServiceError> {
        let backend = MemoryBackend::new(false);
        let ctx = ViewContext::new(day(2024, 6, 15));
        backend.service_requests.seed(vec![request("other", Some("someone@example.com"), "999")]).await?;

        let mut draft = ServiceRequestDraft::new();
        draft.set("customer_name", "Sam")?;
        draft.set("customer_email", "sam@example.com")?;
        draft.set("customer_phone", "555-0101")?;
        draft.set("service_address", "9 Oak Ave")?;
        draft.set("service_type", "mowing")?;
        request_service::submit(&backend.client(None), &draft, &ctx).await?;

        let token = backend.sign_in(user("sam@example.com", None)).await;
        let page = load(&backend.client(Some(token)), &ctx).await?;
        let MyRequestsPage::Requests { requests, .. } = page else {
            panic!("expected requests");
        };
        assert_eq!(requests.len(), 1);
        let card = &requests.items[0];
        assert_eq!(card.title, "Mowing");
        assert_eq!(card.status_label, "Pending Review");
        assert!(card.preferred_date.is_none());
        let json = serde_json::to_value(card)?;
        assert!(json.get("preferred_date").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn signed_in_submission_is_owned_via_created_by() -> Result<(), ServiceError> {
        let backend = MemoryBackend::new(true);
        let ctx = ViewContext::new(day(2024, 6, 15));
        let token = backend.sign_in(user("owner@example.com", None)).await;
        let client = backend.client(Some(token));

        let mut draft = ServiceRequestDraft::new();
        draft.set("customer_name", "Neighbor")?;
        draft.set("customer_phone", "555-0000")?;
        draft.set("service_address", "2 Elm St")?;
        draft.set("service_type", "aeration")?;
        request_service::submit(&client, &draft, &ctx).await?;

        let page = load(&client, &ctx).await?;
        match page {
            MyRequestsPage::Requests { requests, viewer, .. } => {
                assert_eq!(viewer, "owner@example.com");
                assert_eq!(requests.len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
        Ok(())
    }
}
