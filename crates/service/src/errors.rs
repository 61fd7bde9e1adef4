use thiserror::Error;

/// Failures of the current-user lookup or of a call the backend refused
/// for lack of a session.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("forbidden: {0}")]
    Forbidden(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("backend unreachable: {0}")]
    Transport(String),
    #[error("unexpected backend payload: {0}")]
    Decode(String),
    #[error("page load timed out after {0}s")]
    Timeout(u64),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn is_auth(&self) -> bool { matches!(self, ServiceError::Auth(_)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Auth(_) => 1004,
            ServiceError::Model(_) => 1005,
            ServiceError::Backend { .. } => 1200,
            ServiceError::Transport(_) => 1201,
            ServiceError::Decode(_) => 1202,
            ServiceError::Timeout(_) => 1203,
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self { ServiceError::Decode(e.to_string()) }
}
