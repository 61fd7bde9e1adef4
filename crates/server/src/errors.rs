use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    pub error: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: JsonApiError,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self { status, body: JsonApiError { error, message: message.into() } }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "validation", message)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let (status, error) = match &e {
            ServiceError::Validation(_) | ServiceError::Model(_) => (StatusCode::BAD_REQUEST, "validation"),
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ServiceError::Auth(service::errors::AuthError::Unauthenticated) => {
                (StatusCode::UNAUTHORIZED, "authentication_required")
            }
            ServiceError::Auth(service::errors::AuthError::Forbidden(_)) => (StatusCode::FORBIDDEN, "forbidden"),
            ServiceError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
            ServiceError::Backend { .. } | ServiceError::Transport(_) | ServiceError::Decode(_) => {
                (StatusCode::BAD_GATEWAY, "backend")
            }
        };
        if status.is_server_error() {
            error!(code = e.code(), error = %e, "request failed");
        } else {
            warn!(code = e.code(), error = %e, "request rejected");
        }
        Self::new(status, error, e.to_string())
    }
}

/// Malformed bodies and unknown enum values are validation errors.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(status = rejection.status().as_u16(), error = %rejection.body_text(), "json body rejected");
        Self::bad_request(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("backend client init failed: {0}")]
    Backend(#[from] ServiceError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::errors::AuthError;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("Job"), StatusCode::NOT_FOUND),
            (AuthError::Unauthenticated.into(), StatusCode::UNAUTHORIZED),
            (ServiceError::Backend { status: 500, message: "boom".into() }, StatusCode::BAD_GATEWAY),
            (ServiceError::Transport("refused".into()), StatusCode::BAD_GATEWAY),
            (ServiceError::Timeout(20), StatusCode::GATEWAY_TIMEOUT),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[tokio::test]
    async fn json_rejection_becomes_validation_body() {
        use axum::body::Body;
        use axum::extract::FromRequest;
        use axum::http::Request;
        use axum::Json;

        let req = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"status":"bogus"}"#))
            .unwrap();
        let rejection = Json::<crate::routes::jobs::StatusChange>::from_request(req, &()).await.unwrap_err();
        let err = ApiError::from(rejection);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.error, "validation");
    }
}
