use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use service::layout::{shell_for, Shell};
use service::pages::{load_page, PageQuery, PageView};
use service::routing::resolve_page;

use crate::errors::ApiError;
use crate::state::AppState;
use crate::viewer::Viewer;

/// A page view inside the layout shell.
#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub shell: Shell,
    pub page: PageView,
}

impl PageResponse {
    pub fn new(page: PageView) -> Self {
        Self { shell: shell_for(page.page()), page }
    }

    fn status(&self) -> StatusCode {
        match &self.page {
            PageView::MyRequests(p) if p.requires_auth() => StatusCode::UNAUTHORIZED,
            _ => StatusCode::OK,
        }
    }
}

impl IntoResponse for PageResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

pub async fn page(
    State(state): State<AppState>,
    viewer: Viewer,
    uri: Uri,
    Query(query): Query<PageQuery>,
) -> Result<PageResponse, ApiError> {
    let page = resolve_page(uri.path());
    let ctx = state.view_context(query);
    let client = state.client_for(viewer);
    let view = load_page(&client, page, &ctx).await?;
    Ok(PageResponse::new(view))
}
