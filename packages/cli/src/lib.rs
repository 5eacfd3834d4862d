// ABOUTME: Server bootstrap for the Financial Advisor API
// ABOUTME: Tracing setup, HTTP middleware stack, listener binding and graceful shutdown

use axum::{extract::Request, Router, ServiceExt};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use finadvisor_api::{create_app, with_trailing_slash_normalization, AppState};
use finadvisor_core::AppConfig;

/// Install the global tracing subscriber. `RUST_LOG` wins over the debug flag.
pub fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init();
}

/// The application router wrapped in the CORS and request-tracing layers.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_app(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = AppState::init(config).await?;
    let app = with_trailing_slash_normalization(build_router(state));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Financial Advisor API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
