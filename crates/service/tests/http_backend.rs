use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use configs::BackendConfig;
use models::{CustomerInput, CustomerStatus, PropertySize};
use serde_json::{json, Value};
use service::client::{http::HttpBackend, Backend, Patch, SortSpec, UploadFile};
use service::errors::{AuthError, ServiceError};
use tokio::net::TcpListener;

const APP: &str = "app-1";

/// Request lines seen by the fake backend: `METHOD path?query auth app_id`.
type Seen = Arc<Mutex<Vec<String>>>;

fn record(seen: &Seen, line: String) {
    if let Ok(mut v) = seen.lock() {
        v.push(line);
    }
}

fn auth_of(headers: &HeaderMap) -> (String, String) {
    let auth = headers.get("authorization").and_then(|v| v.to_str().ok()).unwrap_or("-").to_string();
    let app = headers.get("x-app-id").and_then(|v| v.to_str().ok()).unwrap_or("-").to_string();
    (auth, app)
}

async fn list_customers(State(seen): State<Seen>, headers: HeaderMap, RawQuery(q): RawQuery) -> Json<Value> {
    let (auth, app) = auth_of(&headers);
    record(&seen, format!("GET Customer?{} {auth} {app}", q.unwrap_or_default()));
    Json(json!([
        {"id": "c1", "name": "Ann", "phone": "555", "service_address": "1 Elm St", "email": ""},
        {"id": "c2", "name": "Bob", "phone": "556", "service_address": "2 Oak St", "status": "inactive"}
    ]))
}

async fn create_customer(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
    record(&seen, format!("POST Customer {}", body["name"]));
    let mut out = body;
    out["id"] = json!("c9");
    out["created_date"] = json!("2024-06-15T10:00:00Z");
    Json(out)
}

async fn update_customer(Path(id): Path<String>, Json(patch): Json<Value>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if id == "missing" {
        return Err((StatusCode::NOT_FOUND, Json(json!({"message": "Customer not found"}))));
    }
    Ok(Json(json!({"id": id, "name": "Ann", "phone": "555", "service_address": "1 Elm St", "status": patch["status"]})))
}

async fn delete_customer(Path(_id): Path<String>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn list_jobs() -> (StatusCode, Json<Value>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "db down"})))
}

async fn me(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some("Bearer good") => Ok(Json(json!({"id": "u1", "email": "owner@example.com", "full_name": "Owner"}))),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn upload(mut multipart: Multipart) -> Result<Json<Value>, StatusCode> {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or("blob").to_string();
            let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            return Ok(Json(json!({"file_url": format!("https://files.test/{}/{name}", bytes.len())})));
        }
    }
    Err(StatusCode::BAD_REQUEST)
}

async fn start_fake_backend() -> anyhow::Result<(String, Seen)> {
    let seen: Seen = Arc::default();
    let base = format!("/api/apps/{APP}");
    let app = Router::new()
        .route(&format!("{base}/entities/Customer"), get(list_customers).post(create_customer))
        .route(&format!("{base}/entities/Customer/:id"), put(update_customer).delete(delete_customer))
        .route(&format!("{base}/entities/Job"), get(list_jobs))
        .route(&format!("{base}/entities/User/me"), get(me))
        .route(&format!("{base}/integration-endpoints/Core/UploadFile"), post(upload))
        .with_state(Arc::clone(&seen));
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("fake backend error: {}", e);
        }
    });
    Ok((format!("http://{}:{}", addr.ip(), addr.port()), seen))
}

fn backend(base_url: String) -> anyhow::Result<HttpBackend> {
    let cfg = BackendConfig { base_url, app_id: APP.into(), timeout_secs: 5, ..BackendConfig::default() };
    Ok(HttpBackend::new(&cfg)?)
}

#[tokio::test]
async fn list_sends_sort_limit_token_and_app_id() -> anyhow::Result<()> {
    let (base, seen) = start_fake_backend().await?;
    let client = backend(base)?.client(Some("good".into()));

    let customers = client.customers.list(Some(&SortSpec::desc("created_date")), Some(50)).await?;
    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0].email, None);
    assert_eq!(customers[1].status, CustomerStatus::Inactive);

    let lines = seen.lock().map(|v| v.clone()).unwrap_or_default();
    assert_eq!(lines, [format!("GET Customer?sort=-created_date&limit=50 Bearer good {APP}")]);
    Ok(())
}

#[tokio::test]
async fn create_update_delete_round_trip() -> anyhow::Result<()> {
    let (base, _seen) = start_fake_backend().await?;
    let client = backend(base)?.client(Some("good".into()));

    let input = CustomerInput {
        name: "Dee".into(),
        email: None,
        phone: "555-0123".into(),
        service_address: "3 Cedar Ln".into(),
        property_size: PropertySize::Large,
        notes: None,
        status: CustomerStatus::Active,
    };
    let created = client.customers.create(&input).await?;
    assert_eq!(created.id, "c9");
    assert_eq!(created.property_size, Some(PropertySize::Large));

    let mut patch = Patch::new();
    patch.insert("status".into(), json!("inactive"));
    let updated = client.customers.update("c1", patch.clone()).await?;
    assert_eq!(updated.status, CustomerStatus::Inactive);

    let err = client.customers.update("missing", patch).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    client.customers.delete("c1").await?;
    Ok(())
}

#[tokio::test]
async fn backend_failures_keep_status_and_message() -> anyhow::Result<()> {
    let (base, _seen) = start_fake_backend().await?;
    let client = backend(base)?.client(Some("good".into()));
    match client.jobs.list(None, None).await {
        Err(ServiceError::Backend { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "db down");
        }
        other => panic!("unexpected {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn me_maps_401_to_unauthenticated() -> anyhow::Result<()> {
    let (base, _seen) = start_fake_backend().await?;
    let http = backend(base)?;
    assert_eq!(http.client(Some("good".into())).auth.me().await?.email, "owner@example.com");
    let err = http.client(Some("stale".into())).auth.me().await.unwrap_err();
    assert!(matches!(err, ServiceError::Auth(AuthError::Unauthenticated)));
    Ok(())
}

#[tokio::test]
async fn upload_posts_multipart_file() -> anyhow::Result<()> {
    let (base, _seen) = start_fake_backend().await?;
    let client = backend(base)?.client(Some("good".into()));
    let up = client
        .files
        .upload(UploadFile { file_name: "yard.jpg".into(), content_type: Some("image/jpeg".into()), bytes: vec![0; 7] })
        .await?;
    assert_eq!(up.file_url, "https://files.test/7/yard.jpg");
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() -> anyhow::Result<()> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    drop(listener);
    let client = backend(format!("http://{addr}"))?.client(Some("good".into()));
    assert!(matches!(client.customers.list(None, None).await, Err(ServiceError::Transport(_))));
    Ok(())
}
