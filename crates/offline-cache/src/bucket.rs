use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

/// A stored response. Bodies are text; this layer fronts pages, styles,
/// scripts and JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl CachedResponse {
    pub fn ok(content_type: &str, body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: content_type.to_string(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Named, versioned collections of cached responses. The sole shared
/// mutable state between worker generations.
#[derive(Debug, Default)]
pub struct BucketTable {
    buckets: HashMap<String, HashMap<String, CachedResponse>>,
}

pub type SharedBuckets = Arc<Mutex<BucketTable>>;

impl BucketTable {
    pub fn shared() -> SharedBuckets {
        Arc::new(Mutex::new(Self::default()))
    }

    /// Ensure a bucket exists for `key`.
    pub fn open(&mut self, key: &str) {
        self.buckets.entry(key.to_string()).or_default();
    }

    pub fn put(&mut self, key: &str, url: &str, response: CachedResponse) {
        self.buckets
            .entry(key.to_string())
            .or_default()
            .insert(url.to_string(), response);
    }

    pub fn get(&self, key: &str, url: &str) -> Option<&CachedResponse> {
        self.buckets.get(key)?.get(url)
    }

    pub fn delete(&mut self, key: &str) -> bool {
        self.buckets.remove(key).is_some()
    }

    pub fn keys(&self) -> Vec<String> {
        self.buckets.keys().cloned().collect()
    }
}
