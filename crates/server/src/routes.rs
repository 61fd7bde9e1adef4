use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, patch, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::errors::ApiError;
use crate::state::AppState;

pub mod customers;
pub mod invoices;
pub mod jobs;
pub mod pages;
pub mod requests;

/// Uploads carry photos; the default 2 MB body limit is too small.
const UPLOAD_BODY_LIMIT: usize = 25 * 1024 * 1024;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> Result<String, ApiError> {
    service::metrics::encode_metrics().map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "metrics", e))
}

/// Build the full application router: probes, mutation API and the page
/// fallback that resolves any other path to a page view.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let probes = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    let api = Router::new()
        .route("/api/customers", post(customers::create))
        .route("/api/customers/:id", put(customers::update).delete(customers::remove))
        .route("/api/jobs", post(jobs::create))
        .route("/api/jobs/:id", put(jobs::update).delete(jobs::remove))
        .route("/api/jobs/:id/status", patch(jobs::change_status))
        .route("/api/invoices", post(invoices::create))
        .route("/api/invoices/:id", put(invoices::update).delete(invoices::remove))
        .route("/api/service-requests", post(requests::submit))
        .route(
            "/api/uploads",
            post(requests::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        );

    probes
        .merge(api)
        .route("/", get(pages::page))
        .fallback(get(pages::page))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
