/// Server setup and initialization
///
/// Wires together configuration, the shared pool, tenant executor and HTTP routes.

use crate::{
    api::{
        create_contact_routes, create_project_routes, create_settings_routes, create_tenant_routes,
        AppState,
    },
    config::Config,
};
use anyhow::Result;
use axum::{
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

/// Build the router for an already-constructed state
///
/// Performs no I/O, so tests can drive it with `tower::ServiceExt::oneshot`.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, state.resolver.header().clone()]);

    Router::new()
        .route("/health", get(health_check))
        .merge(create_project_routes())
        .merge(create_contact_routes())
        .merge(create_settings_routes())
        .merge(create_tenant_routes())
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Create the main Axum application from configuration
pub async fn create_app(config: &Config) -> Result<Router> {
    tracing::info!("🗄️ Preparing lazy Postgres pool (max {} connections)", config.database.max_connections);
    let state = AppState::from_config(config)?;

    tracing::info!("🔑 Tenant header: {}", state.resolver.header_name());
    tracing::info!("📡 Creating HTTP router with all endpoints");
    let app = create_router(state);

    tracing::info!("✅ Application initialized successfully");
    Ok(app)
}

/// Initialize the tracing subscriber (RUST_LOG, default "info")
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .try_init();
}

/// Start the HTTP server with the given configuration
pub async fn start_server(config: Config) -> Result<()> {
    init_tracing();

    tracing::info!("Starting portfolio API server...");

    let app = create_app(&config).await?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    // Connect info feeds the peer address recorded with contact messages
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}

/// GET /health
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not_found" })))
}
