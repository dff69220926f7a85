//! HTTP handlers for the reader API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use reader_types::{ContentStore, DocumentMeta, DocumentPatch, NewDocument};

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// All documents, metadata only.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DocumentMeta>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// Create a document. The canonical body is stored server-side.
pub async fn create_file(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateFileRequest>,
) -> Result<(StatusCode, Json<DocumentMeta>), ApiError> {
    let (title, content) = match (req.title, req.content) {
        (Some(title), Some(content)) if !title.is_empty() && !content.is_empty() => {
            (title, content)
        }
        _ => {
            return Err(ApiError::InvalidRequest(
                "Title and content are required".to_string(),
            ))
        }
    };

    let meta = state
        .store
        .create(NewDocument {
            title,
            content,
            create_time: req.create_time,
            last_access_time: req.last_access_time,
            length: req.length,
        })
        .await?;

    tracing::info!("Created file: {}", meta.id);
    Ok((StatusCode::CREATED, Json(meta)))
}

pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<DocumentMeta>, ApiError> {
    Ok(Json(state.store.get_meta(id).await?))
}

pub async fn get_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ContentResponse>, ApiError> {
    let content = state.store.get_content(id).await?;
    Ok(Json(ContentResponse { content }))
}

/// Partial update; only supplied fields overwrite.
pub async fn update_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateFileRequest>,
) -> Result<Json<DocumentMeta>, ApiError> {
    let meta = state
        .store
        .set_meta(
            id,
            DocumentPatch {
                title: req.title,
                content: req.content,
            },
        )
        .await?;
    Ok(Json(meta))
}

/// Idempotent delete: a missing id still reports success so client retry
/// logic stays simple.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.store.remove(id).await?;
    Ok(Json(DeleteResponse { success: true }))
}

/// Rewrite a passage to a target Lexile level.
pub async fn adjust_lexile(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdjustLexileRequest>,
) -> Result<Json<reader_types::RewriteOutcome>, ApiError> {
    let (passage, target_level) = match (req.passage, req.target_level) {
        (Some(passage), Some(target_level)) if !passage.is_empty() => (passage, target_level),
        _ => {
            return Err(ApiError::InvalidRequest(
                "Passage and target level are required".to_string(),
            ))
        }
    };

    let outcome = state
        .rewriter
        .rewrite(&passage, target_level)
        .await
        .map_err(|e| ApiError::RewriteFailed(e.to_string()))?;

    tracing::info!(
        "Adjusted passage from {}L to {}L",
        outcome.original_level,
        outcome.adjusted_level
    );
    Ok(Json(outcome))
}
