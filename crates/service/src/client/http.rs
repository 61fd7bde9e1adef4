use std::{marker::PhantomData, sync::Arc, time::Duration};

use async_trait::async_trait;
use configs::BackendConfig;
use models::{Customer, Invoice, Job, Record, ServiceRequest, User};
use reqwest::{multipart, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::{AuthProvider, Backend, EntityApi, EntityClient, FileUploader, Patch, SortSpec, UploadFile, UploadedFile};
use crate::errors::{AuthError, ServiceError};
use crate::metrics;

struct HttpConnection {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
    requires_auth: bool,
}

/// Hosted backend reached over HTTPS. One instance per process; cheap to clone.
#[derive(Clone)]
pub struct HttpBackend {
    conn: Arc<HttpConnection>,
}

impl HttpBackend {
    pub fn new(cfg: &BackendConfig) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(HttpConnection {
                http,
                base_url: cfg.base_url.trim_end_matches('/').to_string(),
                app_id: cfg.app_id.clone(),
                requires_auth: cfg.requires_auth,
            }),
        })
    }
}

impl Backend for HttpBackend {
    fn client(&self, token: Option<String>) -> EntityClient {
        let session = Arc::new(HttpSession { conn: Arc::clone(&self.conn), token });
        EntityClient {
            customers: Arc::new(HttpCollection::<Customer>::new(Arc::clone(&session))),
            jobs: Arc::new(HttpCollection::<Job>::new(Arc::clone(&session))),
            invoices: Arc::new(HttpCollection::<Invoice>::new(Arc::clone(&session))),
            service_requests: Arc::new(HttpCollection::<ServiceRequest>::new(Arc::clone(&session))),
            auth: Arc::new(HttpAuth { session: Arc::clone(&session) }),
            files: Arc::new(HttpFiles { session }),
        }
    }
}

/// A connection plus the viewer's bearer token.
struct HttpSession {
    conn: Arc<HttpConnection>,
    token: Option<String>,
}

impl HttpSession {
    fn app_url(&self, tail: &str) -> String {
        format!("{}/api/apps/{}/{}", self.conn.base_url, self.conn.app_id, tail)
    }

    fn entities_url(&self, entity: &str) -> String {
        self.app_url(&format!("entities/{entity}"))
    }

    fn request(&self, method: Method, url: &str) -> Result<RequestBuilder, ServiceError> {
        if self.conn.requires_auth && self.token.is_none() {
            return Err(AuthError::Unauthenticated.into());
        }
        let mut rb = self.conn.http.request(method, url).header("X-App-Id", &self.conn.app_id);
        if let Some(token) = &self.token {
            rb = rb.bearer_auth(token);
        }
        Ok(rb)
    }

    async fn send(&self, entity: &str, op: &str, rb: RequestBuilder) -> Result<reqwest::Response, ServiceError> {
        let res = match rb.send().await {
            Ok(res) => res,
            Err(e) => {
                metrics::record_backend_call(entity, op, false);
                warn!(entity, op, error = %e, "backend_unreachable");
                return Err(ServiceError::Transport(e.to_string()));
            }
        };
        let status = res.status();
        metrics::record_backend_call(entity, op, status.is_success());
        debug!(entity, op, status = status.as_u16(), "backend_response");
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.unwrap_or_default();
        Err(error_for_status(status, entity, &body))
    }

    async fn send_json<T: DeserializeOwned>(&self, entity: &str, op: &str, rb: RequestBuilder) -> Result<T, ServiceError> {
        let res = self.send(entity, op, rb).await?;
        res.json::<T>().await.map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

fn error_for_status(status: StatusCode, entity: &str, body: &str) -> ServiceError {
    let message = error_message(body);
    match status {
        StatusCode::UNAUTHORIZED => AuthError::Unauthenticated.into(),
        StatusCode::FORBIDDEN => AuthError::Forbidden(message).into(),
        StatusCode::NOT_FOUND => ServiceError::not_found(entity),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ServiceError::Validation(message),
        other => ServiceError::Backend { status: other.as_u16(), message },
    }
}

/// Pull a human message out of a JSON error body, else the raw text.
fn error_message(body: &str) -> String {
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "detail", "error"] {
            if let Some(s) = v.get(key).and_then(|m| m.as_str()) {
                return s.to_string();
            }
        }
    }
    body.chars().take(200).collect()
}

struct HttpCollection<T> {
    session: Arc<HttpSession>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HttpCollection<T> {
    fn new(session: Arc<HttpSession>) -> Self {
        Self { session, _marker: PhantomData }
    }
}

#[async_trait]
impl<T: Record> EntityApi<T> for HttpCollection<T> {
    #[instrument(skip(self), fields(entity = T::ENTITY))]
    async fn list(&self, sort: Option<&SortSpec>, limit: Option<usize>) -> Result<Vec<T>, ServiceError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(sort) = sort {
            query.push(("sort", sort.as_query()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        let rb = self.session.request(Method::GET, &self.session.entities_url(T::ENTITY))?.query(&query);
        self.session.send_json(T::ENTITY, "list", rb).await
    }

    #[instrument(skip(self, input), fields(entity = T::ENTITY))]
    async fn create(&self, input: &T::Input) -> Result<T, ServiceError> {
        let rb = self.session.request(Method::POST, &self.session.entities_url(T::ENTITY))?.json(input);
        self.session.send_json(T::ENTITY, "create", rb).await
    }

    #[instrument(skip(self, patch), fields(entity = T::ENTITY))]
    async fn update(&self, id: &str, patch: Patch) -> Result<T, ServiceError> {
        let url = format!("{}/{}", self.session.entities_url(T::ENTITY), id);
        let rb = self.session.request(Method::PUT, &url)?.json(&patch);
        self.session.send_json(T::ENTITY, "update", rb).await
    }

    #[instrument(skip(self), fields(entity = T::ENTITY))]
    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let url = format!("{}/{}", self.session.entities_url(T::ENTITY), id);
        let rb = self.session.request(Method::DELETE, &url)?;
        self.session.send(T::ENTITY, "delete", rb).await?;
        Ok(())
    }
}

struct HttpAuth {
    session: Arc<HttpSession>,
}

#[async_trait]
impl AuthProvider for HttpAuth {
    async fn me(&self) -> Result<User, ServiceError> {
        // no token means no session, regardless of requires_auth
        if self.session.token.is_none() {
            return Err(AuthError::Unauthenticated.into());
        }
        let url = format!("{}/me", self.session.entities_url("User"));
        let rb = self.session.request(Method::GET, &url)?;
        self.session.send_json("User", "me", rb).await
    }
}

struct HttpFiles {
    session: Arc<HttpSession>,
}

#[async_trait]
impl FileUploader for HttpFiles {
    #[instrument(skip(self, file), fields(file_name = %file.file_name, size = file.bytes.len()))]
    async fn upload(&self, file: UploadFile) -> Result<UploadedFile, ServiceError> {
        let mut part = multipart::Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(ct) = &file.content_type {
            part = part.mime_str(ct).map_err(|e| ServiceError::Validation(format!("invalid content type: {e}")))?;
        }
        let form = multipart::Form::new().part("file", part);
        let url = self.session.app_url("integration-endpoints/Core/UploadFile");
        let rb = self.session.request(Method::POST, &url)?.multipart(form);
        self.session.send_json("UploadFile", "upload", rb).await
    }
}
