use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use service::client::UploadFile;
use service::drafts::ServiceRequestDraft;
use service::pages::request_service::{self, SubmittedRequest};
use service::pages::{bounded, PageQuery};
use service::routing::Page;
use tracing::debug;

use crate::errors::ApiError;
use crate::state::AppState;
use crate::viewer::Viewer;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_urls: Vec<String>,
}

/// Public intake form submission.
pub async fn submit(
    State(state): State<AppState>,
    viewer: Viewer,
    WithRejection(Json(draft), _): WithRejection<Json<ServiceRequestDraft>, ApiError>,
) -> Result<(StatusCode, Json<SubmittedRequest>), ApiError> {
    let ctx = state.view_context(PageQuery::default());
    let client = state.client_for(viewer);
    let done = bounded(Page::RequestService, &ctx, request_service::submit(&client, &draft, &ctx)).await?;
    Ok((StatusCode::CREATED, Json(done)))
}

/// Every multipart field that carries a file name is uploaded; other
/// fields are ignored.
pub async fn upload(
    State(state): State<AppState>,
    viewer: Viewer,
    WithRejection(mut multipart, _): WithRejection<Multipart, ApiError>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| ApiError::bad_request(e.to_string()))? {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            debug!(field = ?field.name(), "skipping non-file multipart field");
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| ApiError::bad_request(e.to_string()))?;
        files.push(UploadFile { file_name, content_type, bytes: bytes.to_vec() });
    }
    if files.is_empty() {
        return Err(ApiError::bad_request("no files in upload"));
    }
    let ctx = state.view_context(PageQuery::default());
    let client = state.client_for(viewer);
    let file_urls = bounded(Page::RequestService, &ctx, request_service::upload_photos(&client, files)).await?;
    Ok(Json(UploadResponse { file_urls }))
}
