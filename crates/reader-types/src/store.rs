use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{DocumentMeta, DocumentPatch, NewDocument};

/// Contract shared by the server-side file store, the client-side local
/// mirror and the remote HTTP client. All mutation goes through these
/// operations; implementations own their state.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Assigns an id, defaults timestamps to now, computes `length` from
    /// the content when unsupplied, and persists metadata and body.
    async fn create(&self, doc: NewDocument) -> Result<DocumentMeta, StoreError>;

    /// All known documents, metadata only. Order unspecified.
    async fn list(&self) -> Result<Vec<DocumentMeta>, StoreError>;

    async fn get_meta(&self, id: u64) -> Result<DocumentMeta, StoreError>;

    /// Partial update; `last_access_time` is always stamped on write.
    async fn set_meta(&self, id: u64, patch: DocumentPatch) -> Result<DocumentMeta, StoreError>;

    async fn get_content(&self, id: u64) -> Result<String, StoreError>;

    /// Idempotent: removing a missing id is not an error.
    async fn remove(&self, id: u64) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: ContentStore + ?Sized> ContentStore for Arc<T> {
    async fn create(&self, doc: NewDocument) -> Result<DocumentMeta, StoreError> {
        (**self).create(doc).await
    }

    async fn list(&self) -> Result<Vec<DocumentMeta>, StoreError> {
        (**self).list().await
    }

    async fn get_meta(&self, id: u64) -> Result<DocumentMeta, StoreError> {
        (**self).get_meta(id).await
    }

    async fn set_meta(&self, id: u64, patch: DocumentPatch) -> Result<DocumentMeta, StoreError> {
        (**self).set_meta(id, patch).await
    }

    async fn get_content(&self, id: u64) -> Result<String, StoreError> {
        (**self).get_content(id).await
    }

    async fn remove(&self, id: u64) -> Result<(), StoreError> {
        (**self).remove(id).await
    }
}
