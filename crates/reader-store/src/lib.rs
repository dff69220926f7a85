//! File-backed server-side content store.
//!
//! One JSON index side-file holds every document's metadata plus the next
//! id; each body lives in its own `<id>.txt`. The whole index is rewritten
//! after every mutating call; the index carries metadata only, so the
//! rewrite stays small.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{info, warn};

use reader_types::{ContentStore, DocumentMeta, DocumentPatch, NewDocument, StoreError};

const INDEX_FILE: &str = "file-index.json";
const FILES_DIR: &str = "files";

/// Store policy knobs. Client-supplied timestamps on create are honored by
/// default for import fidelity; turn it off to stamp server time instead.
#[derive(Debug, Clone, Copy)]
pub struct StorePolicy {
    pub trust_client_timestamps: bool,
}

impl Default for StorePolicy {
    fn default() -> Self {
        Self {
            trust_client_timestamps: true,
        }
    }
}

/// Serialized index layout: `{files: {id -> metadata}, nextId}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileIndex {
    #[serde(default)]
    files: BTreeMap<u64, DocumentMeta>,
    #[serde(default = "first_id")]
    next_id: u64,
}

fn first_id() -> u64 {
    1
}

struct Entry {
    meta: DocumentMeta,
    /// In-memory copy of the body, kept as the fallback when the body file
    /// is unreadable. Absent for documents loaded from a previous run.
    content: Option<String>,
}

struct Inner {
    files: BTreeMap<u64, Entry>,
    next_id: u64,
}

/// The one shared mutable resource in the process. A single mutex
/// serializes all index mutation; cross-process concurrency is out of
/// scope.
pub struct FileStore {
    data_dir: PathBuf,
    files_dir: PathBuf,
    policy: StorePolicy,
    inner: Mutex<Inner>,
}

impl FileStore {
    /// Open (or initialize) a store rooted at `data_dir`.
    pub async fn open(data_dir: impl AsRef<Path>, policy: StorePolicy) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let files_dir = data_dir.join(FILES_DIR);
        fs::create_dir_all(&files_dir).await?;

        let index_path = data_dir.join(INDEX_FILE);
        let inner = match fs::read_to_string(&index_path).await {
            Ok(data) => {
                let index: FileIndex = serde_json::from_str(&data)?;
                info!("Loaded {} files from storage", index.files.len());
                Inner {
                    files: index
                        .files
                        .into_iter()
                        .map(|(id, meta)| (id, Entry { meta, content: None }))
                        .collect(),
                    next_id: index.next_id,
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No existing file index found, starting fresh");
                Inner {
                    files: BTreeMap::new(),
                    next_id: 1,
                }
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            data_dir,
            files_dir,
            policy,
            inner: Mutex::new(inner),
        })
    }

    fn body_path(&self, id: u64) -> PathBuf {
        self.files_dir.join(format!("{}.txt", id))
    }

    async fn save_index(&self, inner: &Inner) -> Result<(), StoreError> {
        let index = FileIndex {
            files: inner
                .files
                .iter()
                .map(|(id, entry)| (*id, entry.meta.clone()))
                .collect(),
            next_id: inner.next_id,
        };
        let data = serde_json::to_string_pretty(&index)?;
        fs::write(self.data_dir.join(INDEX_FILE), data).await?;
        Ok(())
    }
}

#[async_trait]
impl ContentStore for FileStore {
    async fn create(&self, doc: NewDocument) -> Result<DocumentMeta, StoreError> {
        if doc.title.is_empty() || doc.content.is_empty() {
            return Err(StoreError::ValidationFailed(
                "Title and content are required".to_string(),
            ));
        }

        let now = Utc::now();
        let (create_time, last_access_time) = if self.policy.trust_client_timestamps {
            (
                doc.create_time.unwrap_or(now),
                doc.last_access_time.unwrap_or(now),
            )
        } else {
            (now, now)
        };
        let length = doc.length.unwrap_or_else(|| doc.content.chars().count());

        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let meta = DocumentMeta {
            id,
            title: doc.title,
            create_time,
            last_access_time,
            length,
            server_stored: false,
        };

        fs::write(self.body_path(id), &doc.content).await?;
        inner.files.insert(
            id,
            Entry {
                meta: meta.clone(),
                content: Some(doc.content),
            },
        );
        self.save_index(&inner).await?;

        info!("Created file {} ({} chars)", id, length);
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
            fs::write(self.files_dir.join(format!("{}.txt", id)), &content).await?;
            entry.content = Some(content);
        }
        entry.meta.last_access_time = Utc::now();

        let meta = entry.meta.clone();
        self.save_index(&inner).await?;
        Ok(meta)
    }

    async fn get_content(&self, id: u64) -> Result<String, StoreError> {
        let mut inner = self.inner.lock().await;
        if !inner.files.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }

        match fs::read_to_string(self.body_path(id)).await {
            Ok(content) => {
                // Reading a body counts as an access.
                if let Some(entry) = inner.files.get_mut(&id) {
                    entry.meta.last_access_time = Utc::now();
                }
                self.save_index(&inner).await?;
                Ok(content)
            }
            Err(e) => {
                warn!("Error reading body of file {}: {}", id, e);
                match inner.files.get(&id).and_then(|e| e.content.clone()) {
                    Some(content) => {
                        info!("Using in-memory content for file {}", id);
                        Ok(content)
                    }
                    None => Err(StoreError::ContentUnavailable(id)),
                }
            }
        }
    }

    async fn remove(&self, id: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.files.remove(&id).is_none() {
            // Idempotent: nothing to do, and not an error.
            return Ok(());
        }

        if let Err(e) = fs::remove_file(self.body_path(id)).await {
            warn!("Error deleting body of file {}: {}", id, e);
        }
        self.save_index(&inner).await?;
        info!("Removed file {}", id);
        Ok(())
    }
}
