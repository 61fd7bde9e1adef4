use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use service::drafts::CustomerDraft;
use service::pages::{bounded, customers, PageQuery, PageView};
use service::routing::Page;

use super::pages::PageResponse;
use crate::errors::ApiError;
use crate::state::AppState;
use crate::viewer::Viewer;

pub async fn create(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(query): Query<PageQuery>,
    WithRejection(Json(draft), _): WithRejection<Json<CustomerDraft>, ApiError>,
) -> Result<PageResponse, ApiError> {
    let ctx = state.view_context(query);
    let client = state.client_for(viewer);
    let page = bounded(Page::Customers, &ctx, customers::save(&client, None, &draft, &ctx)).await?;
    Ok(PageResponse::new(PageView::Customers(page)))
}

pub async fn update(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
    WithRejection(Json(draft), _): WithRejection<Json<CustomerDraft>, ApiError>,
) -> Result<PageResponse, ApiError> {
    let ctx = state.view_context(query);
    let client = state.client_for(viewer);
    let page = bounded(Page::Customers, &ctx, customers::save(&client, Some(&id), &draft, &ctx)).await?;
    Ok(PageResponse::new(PageView::Customers(page)))
}

pub async fn remove(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<PageResponse, ApiError> {
    let ctx = state.view_context(query);
    let client = state.client_for(viewer);
    let page = bounded(Page::Customers, &ctx, customers::delete(&client, &id, &ctx)).await?;
    Ok(PageResponse::new(PageView::Customers(page)))
}
