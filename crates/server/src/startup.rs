use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, BackendConfig, BackendMode, ServerConfig};
use service::client::{http::HttpBackend, memory::MemoryBackend, Backend};
use service::pages::PageSettings;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Pick the backend named by `backend.mode`.
pub fn build_backend(cfg: &BackendConfig) -> Result<Arc<dyn Backend>, StartupError> {
    match cfg.mode {
        BackendMode::Http => {
            info!(base_url = %cfg.base_url, app_id = %cfg.app_id, requires_auth = cfg.requires_auth, "using hosted backend");
            Ok(Arc::new(HttpBackend::new(cfg)?))
        }
        BackendMode::Memory => {
            warn!(requires_auth = cfg.requires_auth, "using in-memory backend; data is lost on restart");
            Ok(Arc::new(MemoryBackend::new(cfg.requires_auth)))
        }
    }
}

pub fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let backend = build_backend(&cfg.backend)?;
    let state = AppState::new(backend, PageSettings::from(&cfg.pages));
    Ok(routes::build_router(state, build_cors()))
}

fn bind_addr(cfg: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}:{}: {e}", cfg.host, cfg.port)))
}

/// Build the app for an already loaded config and serve it until the
/// listener fails.
pub async fn serve(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg)?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
