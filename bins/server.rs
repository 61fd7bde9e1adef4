use std::process::ExitCode;

use configs::AppConfig;
use tracing::{error, info, warn};
use uuid::Uuid;

/// `.env` first so `RUST_LOG` and `LOG_FORMAT` apply to the subscriber.
fn init_logging() {
    dotenvy::dotenv().ok();
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        common::utils::logging::init_logging_json();
    } else {
        common::utils::logging::init_logging_default();
    }
}

fn install_panic_hook(instance: Uuid) {
    std::panic::set_hook(Box::new(move |info| {
        error!(event = "panic", %instance, message = %info, "unhandled panic");
    }));
}

fn build_runtime(cfg: &AppConfig) -> std::io::Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = cfg.server.worker_threads {
        builder.worker_threads(threads);
    }
    builder.build()
}

fn main() -> ExitCode {
    init_logging();

    let instance = Uuid::new_v4();
    install_panic_hook(instance);

    let cfg = match AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(event = "config_invalid", error = %e, "refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let rt = match build_runtime(&cfg) {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        event = "start",
        %instance,
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        backend = ?cfg.backend.mode,
        addr = %format!("{}:{}", cfg.server.host, cfg.server.port),
        "landscape ops server starting"
    );

    rt.block_on(async move {
        tokio::select! {
            res = server::serve(cfg) => match res {
                Ok(()) => {
                    info!(event = "stop", %instance, "server stopped");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(event = "serve_failed", %instance, error = %e, "server exited with error");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                // dropping the serve future cancels in-flight page loads
                warn!(event = "shutdown_signal", %instance, "ctrl-c received, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
