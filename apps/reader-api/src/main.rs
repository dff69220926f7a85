//! Reader API server - storage and rewrite backend for the document reader
//!
//! Provides REST endpoints for:
//! - Document metadata and content storage
//! - Lexile-level passage adjustment

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use reader_api::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("reader_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("Initializing reader API...");
    let state = Arc::new(AppState::new().await?);

    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = router(state).layer(TraceLayer::new_for_http()).layer(cors);

    // Serve the static reader bundle when one is configured.
    if let Ok(static_dir) = std::env::var("READER_STATIC_DIR") {
        info!("Serving static assets from {}", static_dir);
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting reader API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
