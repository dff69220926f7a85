//! Reader API server library: router construction and handlers.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

pub use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/files",
            get(handlers::list_files).post(handlers::create_file),
        )
        .route(
            "/api/files/:id",
            get(handlers::get_file)
                .put(handlers::update_file)
                .delete(handlers::delete_file),
        )
        .route("/api/files/:id/content", get(handlers::get_content))
        .route("/api/adjust-lexile", post(handlers::adjust_lexile))
        .with_state(state)
}
