//! HTTP client for the server's file API.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use lexile_engine::{EngineError, Rewriter};
use reader_types::{
    ContentStore, DocumentMeta, DocumentPatch, NewDocument, RewriteOutcome, StoreError,
};

#[derive(Deserialize)]
struct ContentBody {
    content: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct RemoteStore {
    base_url: String,
    http: reqwest::Client,
}

impl RemoteStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn error_message(response: Response) -> String {
        let status = response.status();
        response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string())
    }
}

fn transport(e: reqwest::Error) -> StoreError {
    StoreError::Remote(e.to_string())
}

#[async_trait]
impl ContentStore for RemoteStore {
    async fn create(&self, doc: NewDocument) -> Result<DocumentMeta, StoreError> {
        let response = self
            .http
            .post(self.url("/api/files"))
            .json(&doc)
            .send()
            .await
            .map_err(transport)?;
        match response.status() {
            StatusCode::CREATED => response.json().await.map_err(transport),
            StatusCode::BAD_REQUEST => Err(StoreError::ValidationFailed(
                Self::error_message(response).await,
            )),
            _ => Err(StoreError::Remote(Self::error_message(response).await)),
        }
    }

    async fn list(&self) -> Result<Vec<DocumentMeta>, StoreError> {
        let response = self
            .http
            .get(self.url("/api/files"))
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(StoreError::Remote(Self::error_message(response).await));
        }
        response.json().await.map_err(transport)
    }

    async fn get_meta(&self, id: u64) -> Result<DocumentMeta, StoreError> {
        let response = self
            .http
            .get(self.url(&format!("/api/files/{}", id)))
            .send()
            .await
            .map_err(transport)?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(id)),
            status if status.is_success() => response.json().await.map_err(transport),
            _ => Err(StoreError::Remote(Self::error_message(response).await)),
        }
    }

    async fn set_meta(&self, id: u64, patch: DocumentPatch) -> Result<DocumentMeta, StoreError> {
        let response = self
            .http
            .put(self.url(&format!("/api/files/{}", id)))
            .json(&patch)
            .send()
            .await
            .map_err(transport)?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(id)),
            status if status.is_success() => response.json().await.map_err(transport),
            _ => Err(StoreError::Remote(Self::error_message(response).await)),
        }
    }

    async fn get_content(&self, id: u64) -> Result<String, StoreError> {
        let response = self
            .http
            .get(self.url(&format!("/api/files/{}/content", id)))
            .send()
            .await
            .map_err(transport)?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(id)),
            StatusCode::INTERNAL_SERVER_ERROR => Err(StoreError::ContentUnavailable(id)),
            status if status.is_success() => {
                let body: ContentBody = response.json().await.map_err(transport)?;
                Ok(body.content)
            }
            _ => Err(StoreError::Remote(Self::error_message(response).await)),
        }
    }

    async fn remove(&self, id: u64) -> Result<(), StoreError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/files/{}", id)))
            .send()
            .await
            .map_err(transport)?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::Remote(Self::error_message(response).await))
        }
    }
}

/// The server-side passage-adjust endpoint, seen through the same rewrite
/// contract as the in-process implementations.
#[async_trait]
impl Rewriter for RemoteStore {
    async fn rewrite(
        &self,
        passage: &str,
        target_level: i32,
    ) -> Result<RewriteOutcome, EngineError> {
        let response = self
            .http
            .post(self.url("/api/adjust-lexile"))
            .json(&json!({ "passage": passage, "target_level": target_level }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(EngineError::Provider(Self::error_message(response).await));
        }
        Ok(response.json().await?)
    }
}
