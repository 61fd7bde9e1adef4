use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use models::JobStatus;
use serde::Deserialize;
use service::drafts::JobDraft;
use service::pages::{bounded, jobs, PageQuery, PageView};
use service::routing::Page;

use super::pages::PageResponse;
use crate::errors::ApiError;
use crate::state::AppState;
use crate::viewer::Viewer;

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: JobStatus,
}

pub async fn create(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(query): Query<PageQuery>,
    WithRejection(Json(draft), _): WithRejection<Json<JobDraft>, ApiError>,
) -> Result<PageResponse, ApiError> {
    let ctx = state.view_context(query);
    let client = state.client_for(viewer);
    let page = bounded(Page::Jobs, &ctx, jobs::save(&client, None, &draft, &ctx)).await?;
    Ok(PageResponse::new(PageView::Jobs(page)))
}

pub async fn update(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
    WithRejection(Json(draft), _): WithRejection<Json<JobDraft>, ApiError>,
) -> Result<PageResponse, ApiError> {
    let ctx = state.view_context(query);
    let client = state.client_for(viewer);
    let page = bounded(Page::Jobs, &ctx, jobs::save(&client, Some(&id), &draft, &ctx)).await?;
    Ok(PageResponse::new(PageView::Jobs(page)))
}

pub async fn remove(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<PageResponse, ApiError> {
    let ctx = state.view_context(query);
    let client = state.client_for(viewer);
    let page = bounded(Page::Jobs, &ctx, jobs::delete(&client, &id, &ctx)).await?;
    Ok(PageResponse::new(PageView::Jobs(page)))
}

pub async fn change_status(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
    WithRejection(Json(change), _): WithRejection<Json<StatusChange>, ApiError>,
) -> Result<PageResponse, ApiError> {
    let ctx = state.view_context(query);
    let client = state.client_for(viewer);
    let page = bounded(Page::Jobs, &ctx, jobs::change_status(&client, &id, change.status, &ctx)).await?;
    Ok(PageResponse::new(PageView::Jobs(page)))
}
