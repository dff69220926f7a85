//! Request/response bodies for the reader API.
//!
//! Required fields are `Option` here so the handlers can answer a missing
//! field with the API's own 400 body instead of an extractor rejection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_access_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub length: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFileRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdjustLexileRequest {
    pub passage: Option<String>,
    pub target_level: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentResponse {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}
