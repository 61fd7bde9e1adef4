//! Entity client: the seam between page containers and the hosted backend.
//!
//! Page code only sees [`EntityClient`]; whether the collections live behind
//! HTTP ([`http::HttpBackend`]) or in process ([`memory::MemoryBackend`]) is
//! decided once at startup by whichever [`Backend`] the server holds.

pub mod http;
pub mod memory;
pub mod sort;

use std::sync::Arc;

use async_trait::async_trait;
use models::{Customer, Invoice, Job, Record, ServiceRequest, User};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

pub use sort::SortSpec;

/// Partial record sent with `update`.
pub type Patch = serde_json::Map<String, serde_json::Value>;

/// CRUD over one backend entity collection.
#[async_trait]
pub trait EntityApi<T: Record>: Send + Sync {
    async fn list(&self, sort: Option<&SortSpec>, limit: Option<usize>) -> Result<Vec<T>, ServiceError>;
    async fn create(&self, input: &T::Input) -> Result<T, ServiceError>;
    async fn update(&self, id: &str, patch: Patch) -> Result<T, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current user; `AuthError::Unauthenticated` without a valid session.
    async fn me(&self) -> Result<User, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub file_url: String,
}

#[async_trait]
pub trait FileUploader: Send + Sync {
    async fn upload(&self, file: UploadFile) -> Result<UploadedFile, ServiceError>;
}

/// Everything a page container may call, bound to one viewer's session.
#[derive(Clone)]
pub struct EntityClient {
    pub customers: Arc<dyn EntityApi<Customer>>,
    pub jobs: Arc<dyn EntityApi<Job>>,
    pub invoices: Arc<dyn EntityApi<Invoice>>,
    pub service_requests: Arc<dyn EntityApi<ServiceRequest>>,
    pub auth: Arc<dyn AuthProvider>,
    pub files: Arc<dyn FileUploader>,
}

/// Configured backend connection that hands out per-viewer clients.
pub trait Backend: Send + Sync {
    fn client(&self, token: Option<String>) -> EntityClient;
}

/// Serialize a full input into an update patch (unset optionals become `null`).
pub fn to_patch<I: Serialize>(input: &I) -> Result<Patch, ServiceError> {
    match serde_json::to_value(input)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(ServiceError::Decode(format!("expected object patch, got {other}"))),
    }
}
