use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use service::drafts::InvoiceDraft;
use service::pages::{bounded, invoices, PageQuery, PageView, ViewContext};
use service::routing::Page;

use super::pages::PageResponse;
use crate::errors::ApiError;
use crate::state::AppState;
use crate::viewer::Viewer;

/// A blank invoice date means "today", as in the create dialog.
fn with_default_date(mut draft: InvoiceDraft, ctx: &ViewContext) -> InvoiceDraft {
    if draft.invoice_date.trim().is_empty() {
        draft.invoice_date = ctx.today.to_string();
    }
    draft
}

pub async fn create(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(query): Query<PageQuery>,
    WithRejection(Json(draft), _): WithRejection<Json<InvoiceDraft>, ApiError>,
) -> Result<PageResponse, ApiError> {
    let ctx = state.view_context(query);
    let client = state.client_for(viewer);
    let draft = with_default_date(draft, &ctx);
    let page = bounded(Page::Invoices, &ctx, invoices::save(&client, None, &draft, &ctx)).await?;
    Ok(PageResponse::new(PageView::Invoices(page)))
}

pub async fn update(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
    WithRejection(Json(draft), _): WithRejection<Json<InvoiceDraft>, ApiError>,
) -> Result<PageResponse, ApiError> {
    let ctx = state.view_context(query);
    let client = state.client_for(viewer);
    let page = bounded(Page::Invoices, &ctx, invoices::save(&client, Some(&id), &draft, &ctx)).await?;
    Ok(PageResponse::new(PageView::Invoices(page)))
}

pub async fn remove(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<PageResponse, ApiError> {
    let ctx = state.view_context(query);
    let client = state.client_for(viewer);
    let page = bounded(Page::Invoices, &ctx, invoices::delete(&client, &id, &ctx)).await?;
    Ok(PageResponse::new(PageView::Invoices(page)))
}
