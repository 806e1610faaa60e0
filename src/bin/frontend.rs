// src/bin/frontend.rs

use rebay_frontend::infra::config;
use rebay_frontend::transport;
use rebay_frontend::{BackendClient, SessionStore, StorefrontService};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // --- Service Initialization ---
    let backend = BackendClient::new(config::backend_base_url());
    info!("storefront backed by {}", backend.base_url());

    let sessions = SessionStore::new(config::session_ttl_hours());
    let storefront = Arc::new(StorefrontService::new(backend, sessions));
    let app_state = transport::http::AppState { storefront };

    // --- HTTP Surface ---
    // The catalog is public, so the CORS policy is wide open; gated routes
    // are protected by the session check, not by origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url(
            "/api-docs/openapi.json",
            transport::http::ApiDoc::openapi(),
        ))
        .layer(cors);

    let port = config::frontend_port();
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("frontend listening on http://0.0.0.0:{port}");
    info!("Swagger UI available at http://localhost:{port}/swagger-ui");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, goodbye");
        }
    }

    Ok(())
}
