//! HTTP server facade for bookshelf with Axum, error handling, and OpenAPI support.

use std::sync::Arc;

use anyhow::Context;
use axum::{http::StatusCode, routing::get, Router};

use bookshelf_kernel::{settings::Settings, Module, ModuleRegistry};

pub mod error;
pub mod extract;
pub mod router;

pub use error::AppError;
pub use extract::JsonBody;

use router::RouterBuilder;

/// Serve `app` on the configured address until Ctrl-C or SIGTERM arrives
pub async fn start_server(app: Router, settings: &Settings) -> anyhow::Result<()> {
    let address = settings.server.bind_address();
    tracing::info!("starting HTTP server on {}", address);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {}", address))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> Router {
    let modules: Arc<[Arc<dyn Module>]> = registry.modules().into();
    let mut router_builder =
        RouterBuilder::new().route("/healthz", get(move || health_check(modules.clone())));

    for module in registry.modules() {
        let mount_path = module.mount_path();
        tracing::info!(module = module.name(), "mounting module routes under {}", mount_path);
        router_builder = router_builder.mount_module(&mount_path, module.routes());
    }

    router_builder
        .with_openapi(registry)
        .with_timeout(settings.server.request_timeout_ms)
        .with_request_id()
        .with_cors()
        .with_tracing()
        .build()
}

/// Health check endpoint: 200 when every module reports healthy, 503 otherwise
async fn health_check(modules: Arc<[Arc<dyn Module>]>) -> (StatusCode, &'static str) {
    for module in modules.iter() {
        if let Err(err) = module.health().await {
            tracing::warn!(module = module.name(), error = ?err, "health check failed");
            return (StatusCode::SERVICE_UNAVAILABLE, "unavailable");
        }
    }
    (StatusCode::OK, "ok")
}


async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
