//! In-process stand-in for the hosted backend.
//!
//! Rows are kept as raw JSON objects so sorting and partial updates behave
//! the way they do over the wire. Not a storage engine: nothing is persisted.

use std::{collections::HashMap, marker::PhantomData, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use models::{Customer, Invoice, Job, Record, ServiceRequest, User};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::{AuthProvider, Backend, EntityApi, EntityClient, FileUploader, Patch, SortSpec, UploadFile, UploadedFile};
use crate::errors::{AuthError, ServiceError};

/// One entity collection in insertion order.
pub struct MemoryCollection<T> {
    rows: RwLock<Vec<Value>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self { rows: RwLock::new(Vec::new()), _marker: PhantomData }
    }
}

impl<T: Record> MemoryCollection<T> {
    /// Insert complete records as-is (ids and timestamps included).
    pub async fn seed(&self, records: Vec<T>) -> Result<(), ServiceError> {
        let mut rows = self.rows.write().await;
        for r in records {
            rows.push(serde_json::to_value(r)?);
        }
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    async fn create_as(&self, input: &T::Input, created_by: Option<&str>) -> Result<T, ServiceError> {
        let mut row = match serde_json::to_value(input)? {
            Value::Object(map) => map,
            other => return Err(ServiceError::Decode(format!("expected object input, got {other}"))),
        };
        row.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
        row.insert("created_date".into(), Value::String(Utc::now().to_rfc3339()));
        if let Some(email) = created_by {
            row.insert("created_by".into(), Value::String(email.to_string()));
        }
        let row = Value::Object(row);
        let record: T = serde_json::from_value(row.clone())?;
        self.rows.write().await.push(row);
        Ok(record)
    }
}

#[async_trait]
impl<T: Record> EntityApi<T> for MemoryCollection<T> {
    async fn list(&self, sort: Option<&SortSpec>, limit: Option<usize>) -> Result<Vec<T>, ServiceError> {
        let mut rows = self.rows.read().await.clone();
        if let Some(spec) = sort {
            // stable: ties keep insertion order
            rows.sort_by(|a, b| spec.compare(a, b));
        }
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        rows.into_iter()
            .map(|r| serde_json::from_value(r).map_err(ServiceError::from))
            .collect()
    }

    async fn create(&self, input: &T::Input) -> Result<T, ServiceError> {
        self.create_as(input, None).await
    }

    async fn update(&self, id: &str, patch: Patch) -> Result<T, ServiceError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| ServiceError::not_found(T::ENTITY))?;
        let mut merged = row.clone();
        if let Value::Object(map) = &mut merged {
            for (k, v) in patch {
                if k == "id" || k == "created_date" {
                    continue;
                }
                map.insert(k, v);
            }
        }
        // validate before committing so a bad patch leaves the row untouched
        let record: T = serde_json::from_value(merged.clone())?;
        *row = merged;
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.get("id").and_then(Value::as_str) != Some(id));
        if rows.len() == before {
            return Err(ServiceError::not_found(T::ENTITY));
        }
        Ok(())
    }
}

type Sessions = Arc<RwLock<HashMap<String, User>>>;

/// Per-viewer view of a collection that enforces `requires_auth`.
struct Gated<T> {
    inner: Arc<MemoryCollection<T>>,
    sessions: Sessions,
    token: Option<String>,
    requires_auth: bool,
}

impl<T: Record> Gated<T> {
    async fn viewer(&self) -> Result<Option<User>, ServiceError> {
        let user = match &self.token {
            Some(t) => self.sessions.read().await.get(t).cloned(),
            None => None,
        };
        if self.requires_auth && user.is_none() {
            return Err(AuthError::Unauthenticated.into());
        }
        Ok(user)
    }
}

#[async_trait]
impl<T: Record> EntityApi<T> for Gated<T> {
    async fn list(&self, sort: Option<&SortSpec>, limit: Option<usize>) -> Result<Vec<T>, ServiceError> {
        self.viewer().await?;
        self.inner.list(sort, limit).await
    }

    async fn create(&self, input: &T::Input) -> Result<T, ServiceError> {
        let viewer = self.viewer().await?;
        self.inner.create_as(input, viewer.as_ref().map(|u| u.email.as_str())).await
    }

    async fn update(&self, id: &str, patch: Patch) -> Result<T, ServiceError> {
        self.viewer().await?;
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.viewer().await?;
        self.inner.delete(id).await
    }
}

struct MemoryAuth {
    sessions: Sessions,
    token: Option<String>,
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn me(&self) -> Result<User, ServiceError> {
        let token = self.token.as_ref().ok_or(AuthError::Unauthenticated)?;
        self.sessions
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or_else(|| AuthError::Unauthenticated.into())
    }
}

/// Uploaded bytes keyed by the URL handed back to the caller.
#[derive(Default)]
pub struct MemoryFiles {
    files: RwLock<HashMap<String, UploadFile>>,
}

impl MemoryFiles {
    pub async fn get(&self, url: &str) -> Option<UploadFile> {
        self.files.read().await.get(url).cloned()
    }
}

#[async_trait]
impl FileUploader for MemoryFiles {
    async fn upload(&self, file: UploadFile) -> Result<UploadedFile, ServiceError> {
        if file.bytes.is_empty() {
            return Err(ServiceError::Validation(format!("{} is empty", file.file_name)));
        }
        let url = format!("memory://uploads/{}/{}", Uuid::new_v4(), file.file_name);
        self.files.write().await.insert(url.clone(), file);
        Ok(UploadedFile { file_url: url })
    }
}

struct SharedFiles(Arc<MemoryFiles>);

#[async_trait]
impl FileUploader for SharedFiles {
    async fn upload(&self, file: UploadFile) -> Result<UploadedFile, ServiceError> {
        self.0.upload(file).await
    }
}

/// All four collections, the session table and the file store.
pub struct MemoryBackend {
    pub customers: Arc<MemoryCollection<Customer>>,
    pub jobs: Arc<MemoryCollection<Job>>,
    pub invoices: Arc<MemoryCollection<Invoice>>,
    pub service_requests: Arc<MemoryCollection<ServiceRequest>>,
    pub files: Arc<MemoryFiles>,
    sessions: Sessions,
    requires_auth: bool,
}

impl MemoryBackend {
    pub fn new(requires_auth: bool) -> Self {
        Self {
            customers: Arc::default(),
            jobs: Arc::default(),
            invoices: Arc::default(),
            service_requests: Arc::default(),
            files: Arc::default(),
            sessions: Arc::default(),
            requires_auth,
        }
    }

    /// Open a session for `user`, returning its bearer token.
    pub async fn sign_in(&self, user: User) -> String {
        let token = Uuid::new_v4().to_string();
        info!(user_id = %user.id, email = %user.email, "memory_session_opened");
        self.sessions.write().await.insert(token.clone(), user);
        token
    }

    pub async fn sign_out(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    fn gate<T: Record>(&self, inner: &Arc<MemoryCollection<T>>, token: &Option<String>) -> Arc<Gated<T>> {
        Arc::new(Gated {
            inner: Arc::clone(inner),
            sessions: Arc::clone(&self.sessions),
            token: token.clone(),
            requires_auth: self.requires_auth,
        })
    }
}

impl Backend for MemoryBackend {
    fn client(&self, token: Option<String>) -> EntityClient {
        EntityClient {
            customers: self.gate(&self.customers, &token),
            jobs: self.gate(&self.jobs, &token),
            invoices: self.gate(&self.invoices, &token),
            service_requests: self.gate(&self.service_requests, &token),
            auth: Arc::new(MemoryAuth { sessions: Arc::clone(&self.sessions), token }),
            files: Arc::new(SharedFiles(Arc::clone(&self.files))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{CustomerInput, CustomerStatus, PropertySize};

    fn input(name: &str) -> CustomerInput {
        CustomerInput {
            name: name.into(),
            email: None,
            phone: "555-0100".into(),
            service_address: "1 Elm St".into(),
            property_size: PropertySize::Medium,
            notes: None,
            status: CustomerStatus::Active,
        }
    }

    fn user() -> User {
        User { id: "u1".into(), email: "owner@example.com".into(), full_name: None, phone: None, role: None }
    }

    #[tokio::test]
    async fn crud_roundtrip_through_client() -> Result<(), ServiceError> {
        let backend = MemoryBackend::new(false);
        let client = backend.client(None);

        let a = client.customers.create(&input("Ann")).await?;
        let b = client.customers.create(&input("Bob")).await?;
        assert_ne!(a.id, b.id);
        assert!(a.created_date.is_some());

        let mut patch = Patch::new();
        patch.insert("status".into(), "inactive".into());
        let updated = client.customers.update(&a.id, patch).await?;
        assert_eq!(updated.status, CustomerStatus::Inactive);
        assert_eq!(updated.name, "Ann");

        client.customers.delete(&b.id).await?;
        let all = client.customers.list(None, None).await?;
        assert_eq!(all.len(), 1);
        assert!(matches!(client.customers.delete(&b.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_honours_sort_and_limit() -> Result<(), ServiceError> {
        let backend = MemoryBackend::new(false);
        let client = backend.client(None);
        for name in ["Cy", "Al", "Bo"] {
            client.customers.create(&input(name)).await?;
        }
        let sorted = client.customers.list(Some(&SortSpec::asc("name")), Some(2)).await?;
        let names: Vec<_> = sorted.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Al", "Bo"]);
        Ok(())
    }

    #[tokio::test]
    async fn bad_patch_leaves_row_untouched() -> Result<(), ServiceError> {
        let backend = MemoryBackend::new(false);
        let client = backend.client(None);
        let a = client.customers.create(&input("Ann")).await?;
        let mut patch = Patch::new();
        patch.insert("status".into(), "archived".into());
        assert!(client.customers.update(&a.id, patch).await.is_err());
        let all = client.customers.list(None, None).await?;
        assert_eq!(all[0].status, CustomerStatus::Active);
        Ok(())
    }

    #[tokio::test]
    async fn requires_auth_gates_every_call() -> Result<(), ServiceError> {
        let backend = MemoryBackend::new(true);
        let anonymous = backend.client(None);
        assert!(anonymous.customers.list(None, None).await.unwrap_err().is_auth());
        assert!(anonymous.auth.me().await.unwrap_err().is_auth());

        let token = backend.sign_in(user()).await;
        let signed_in = backend.client(Some(token.clone()));
        assert_eq!(signed_in.auth.me().await?.email, "owner@example.com");
        signed_in.customers.create(&input("Ann")).await?;

        assert!(backend.sign_out(&token).await);
        assert!(signed_in.auth.me().await.unwrap_err().is_auth());
        Ok(())
    }

    #[tokio::test]
    async fn uploads_return_urls() -> Result<(), ServiceError> {
        let backend = MemoryBackend::new(false);
        let client = backend.client(None);
        let up = client
            .files
            .upload(UploadFile { file_name: "yard.jpg".into(), content_type: Some("image/jpeg".into()), bytes: vec![1, 2, 3] })
            .await?;
        assert!(up.file_url.ends_with("/yard.jpg"));
        assert_eq!(backend.files.get(&up.file_url).await.map(|f| f.bytes), Some(vec![1, 2, 3]));
        Ok(())
    }
}
