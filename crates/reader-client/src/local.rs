//! In-process mirror of document metadata for listing and offline reads.
//!
//! Server-stored documents keep a placeholder empty body here; the reading
//! index (bookmarks and outline) is purely local state.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use reader_types::{
    ContentStore, DocumentMeta, DocumentPatch, NewDocument, ReadingIndex, StoreError,
};

struct LocalEntry {
    meta: DocumentMeta,
    content: String,
}

#[derive(Default)]
struct LocalInner {
    files: BTreeMap<u64, LocalEntry>,
    indexes: BTreeMap<u64, ReadingIndex>,
    next_id: u64,
}

#[derive(Default)]
pub struct LocalStore {
    inner: Mutex<LocalInner>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under an id assigned elsewhere (the server).
    /// Server-stored documents get an empty placeholder body.
    pub async fn add(&self, meta: DocumentMeta, content: &str) {
        let mut inner = self.inner.lock().await;
        let content = if meta.server_stored {
            String::new()
        } else {
            content.to_string()
        };
        inner.next_id = inner.next_id.max(meta.id);
        inner.files.insert(meta.id, LocalEntry { meta, content });
    }

    pub async fn get_index(&self, id: u64) -> ReadingIndex {
        let inner = self.inner.lock().await;
        inner.indexes.get(&id).cloned().unwrap_or_default()
    }

    pub async fn set_index(&self, id: u64, index: ReadingIndex) {
        self.inner.lock().await.indexes.insert(id, index);
    }
}

#[async_trait]
impl ContentStore for LocalStore {
    async fn create(&self, doc: NewDocument) -> Result<DocumentMeta, StoreError> {
        if doc.title.is_empty() || doc.content.is_empty() {
            return Err(StoreError::ValidationFailed(
                "Title and content are required".to_string(),
            ));
        }
        let now = Utc::now();
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let meta = DocumentMeta {
            id: inner.next_id,
            title: doc.title,
            create_time: doc.create_time.unwrap_or(now),
            last_access_time: doc.last_access_time.unwrap_or(now),
            length: doc.length.unwrap_or_else(|| doc.content.chars().count()),
            server_stored: false,
        };
        inner.files.insert(
            meta.id,
            LocalEntry {
                meta: meta.clone(),
                content: doc.content,
            },
        );
        Ok(meta)
    }

    async fn list(&self) -> Result<Vec<DocumentMeta>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.files.values().map(|e| e.meta.clone()).collect())
    }

    async fn get_meta(&self, id: u64) -> Result<DocumentMeta, StoreError> {
        let inner = self.inner.lock().await;
        inner
            .files
            .get(&id)
            .map(|e| e.meta.clone())
            .ok_or(StoreError::NotFound(id))
    }

    async fn set_meta(&self, id: u64, patch: DocumentPatch) -> Result<DocumentMeta, StoreError> {
        let mut inner = self.inner.lock().await;
        let entry = inner.files.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(title) = patch.title {
            entry.meta.title = title;
        }
        if let Some(content) = patch.content {
            entry.meta.length = content.chars().count();
            entry.content = content;
        }
        entry.meta.last_access_time = Utc::now();
        Ok(entry.meta.clone())
    }

    async fn get_content(&self, id: u64) -> Result<String, StoreError> {
        let inner = self.inner.lock().await;
        let entry = inner.files.get(&id).ok_or(StoreError::NotFound(id))?;
        if entry.content.is_empty() && entry.meta.server_stored {
            // Placeholder body: the authoritative copy lives on the server.
            return Err(StoreError::ContentUnavailable(id));
        }
        Ok(entry.content.clone())
    }

    async fn remove(&self, id: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.files.remove(&id);
        inner.indexes.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn server_meta(id: u64, title: &str) -> DocumentMeta {
        DocumentMeta {
            id,
            title: title.to_string(),
            create_time: Utc::now(),
            last_access_time: Utc::now(),
            length: 10,
            server_stored: true,
        }
    }

    #[tokio::test]
    async fn test_server_stored_entries_have_no_local_body() {
        let store = LocalStore::new();
        store.add(server_meta(7, "mirrored"), "ignored").await;

        assert_eq!(store.get_meta(7).await.unwrap().title, "mirrored");
        assert!(matches!(
            store.get_content(7).await.unwrap_err(),
            StoreError::ContentUnavailable(7)
        ));
    }

    #[tokio::test]
    async fn test_local_create_assigns_ids_after_mirrored_ones() {
        let store = LocalStore::new();
        store.add(server_meta(5, "mirrored"), "").await;

        let meta = store
            .create(NewDocument {
                title: "local".to_string(),
                content: "body".to_string(),
                ..NewDocument::default()
            })
            .await
            .unwrap();
        assert_eq!(meta.id, 6);
        assert_eq!(store.get_content(6).await.unwrap(), "body");
    }

    #[tokio::test]
    async fn test_reading_index_defaults_and_roundtrips() {
        let store = LocalStore::new();
        assert_eq!(store.get_index(1).await, ReadingIndex::default());

        let index = ReadingIndex {
            bookmarks: vec![0, 4],
            content: vec![],
        };
        store.set_index(1, index.clone()).await;
        assert_eq!(store.get_index(1).await, index);
    }

    #[tokio::test]
    async fn test_remove_clears_index_too() {
        let store = LocalStore::new();
        store.add(server_meta(3, "t"), "").await;
        store
            .set_index(
                3,
                ReadingIndex {
                    bookmarks: vec![1],
                    content: vec![],
                },
            )
            .await;

        store.remove(3).await.unwrap();
        assert!(store.get_meta(3).await.is_err());
        assert_eq!(store.get_index(3).await, ReadingIndex::default());
    }
}
