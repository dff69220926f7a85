use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::bucket::{CachedResponse, SharedBuckets};

const API_PREFIX: &str = "/api/";
const VERSION_QUERY: &str = "version";

#[derive(Debug, Error)]
#[error("Network fetch failed: {0}")]
pub struct FetchError(pub String);

/// Network seam: how the worker reaches the origin. Real transport is the
/// caller's concern.
#[async_trait]
pub trait AssetFetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<CachedResponse, FetchError>;
}

/// Worker lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Installing,
    Active,
    Superseded,
}

/// What the layer decided for one request.
#[derive(Debug, PartialEq)]
pub enum FetchOutcome {
    /// Serve this response: synthetic, cached, freshly fetched, or a
    /// synthesized 503.
    Respond(CachedResponse),
    /// Not intercepted; the caller talks to the network directly.
    Passthrough,
}

/// One generation of the offline cache layer. URLs are request paths with
/// optional query, e.g. `/read.html` or `/css/index.css?v=2`.
pub struct CacheWorker<F> {
    version: String,
    cache_key: String,
    assets: Vec<String>,
    state: Lifecycle,
    buckets: SharedBuckets,
    fetcher: F,
}

impl<F: AssetFetch> CacheWorker<F> {
    pub fn new(version: &str, assets: Vec<String>, buckets: SharedBuckets, fetcher: F) -> Self {
        Self {
            version: version.to_string(),
            cache_key: format!("page-cache-{}", version),
            assets,
            state: Lifecycle::Installing,
            buckets,
            fetcher,
        }
    }

    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    /// Pre-cache the static asset manifest. Each asset is cached
    /// independently; one failure is logged and the rest still cached.
    /// Best-effort, not atomic.
    pub async fn install(&mut self) {
        let mut buckets = self.buckets.lock().await;
        buckets.open(&self.cache_key);

        for asset in &self.assets {
            match self.fetcher.fetch(asset).await {
                Ok(response) if response.is_success() => {
                    debug!("Cached: {}", asset);
                    buckets.put(&self.cache_key, asset, response);
                }
                Ok(response) => {
                    warn!("Failed to cache {}: status {}", asset, response.status);
                }
                Err(e) => {
                    warn!("Failed to cache {}: {}", asset, e);
                }
            }
        }
    }

    /// Delete every bucket whose key is not this worker's. This is the
    /// sole eviction and upgrade mechanism.
    pub async fn activate(&mut self) {
        let mut buckets = self.buckets.lock().await;
        for key in buckets.keys() {
            if key != self.cache_key {
                buckets.delete(&key);
                debug!("Deleted stale cache bucket {}", key);
            }
        }
        buckets.open(&self.cache_key);
        self.state = Lifecycle::Active;
    }

    /// A newer worker's activation displaces this one.
    pub fn supersede(&mut self) {
        self.state = Lifecycle::Superseded;
    }

    /// Route one request. Only GETs from an active worker are intercepted.
    pub async fn handle_fetch(&self, method: &str, url: &str) -> FetchOutcome {
        if self.state != Lifecycle::Active || method != "GET" {
            return FetchOutcome::Passthrough;
        }

        if query_of(url) == Some(VERSION_QUERY) {
            // Version probe: synthetic inline response, no cache, no network.
            let body = format!("/* VERSION */\"{}\"/* VERSION */", self.version);
            return FetchOutcome::Respond(CachedResponse::ok("text/plain", body));
        }

        if path_of(url).starts_with(API_PREFIX) {
            return FetchOutcome::Passthrough;
        }

        if let Some(cached) = self.buckets.lock().await.get(&self.cache_key, url) {
            return FetchOutcome::Respond(cached.clone());
        }

        match self.fetcher.fetch(url).await {
            Ok(response) => {
                if response.is_success() {
                    self.buckets
                        .lock()
                        .await
                        .put(&self.cache_key, url, response.clone());
                }
                FetchOutcome::Respond(response)
            }
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                FetchOutcome::Respond(CachedResponse {
                    status: 503,
                    content_type: "text/plain".to_string(),
                    body: "Network error occurred".to_string(),
                })
            }
        }
    }
}

fn path_of(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

fn query_of(url: &str) -> Option<&str> {
    url.split_once('?').map(|(_, query)| query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::BucketTable;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MapFetcher {
        responses: HashMap<String, CachedResponse>,
        calls: AtomicUsize,
    }

    impl MapFetcher {
        fn new(entries: &[(&str, CachedResponse)]) -> Self {
            Self {
                responses: entries
                    .iter()
                    .map(|(url, response)| (url.to_string(), response.clone()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn empty() -> Self {
            Self::new(&[])
        }
    }

    #[async_trait]
    impl AssetFetch for MapFetcher {
        async fn fetch(&self, url: &str) -> Result<CachedResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError(format!("unreachable: {}", url)))
        }
    }

    async fn active_worker(fetcher: MapFetcher) -> CacheWorker<MapFetcher> {
        let mut worker = CacheWorker::new("1.0.0", vec![], BucketTable::shared(), fetcher);
        worker.activate().await;
        worker
    }

    #[tokio::test]
    async fn test_install_is_best_effort() {
        let fetcher = MapFetcher::new(&[
            ("/index.css", CachedResponse::ok("text/css", "body {}")),
            ("/missing.js", CachedResponse { status: 404, content_type: "text/plain".into(), body: "".into() }),
        ]);
        let buckets = BucketTable::shared();
        let mut worker = CacheWorker::new(
            "1.0.0",
            vec![
                "/index.css".to_string(),
                "/missing.js".to_string(),
                "/unreachable.css".to_string(),
            ],
            buckets.clone(),
            fetcher,
        );
        worker.install().await;

        let table = buckets.lock().await;
        assert!(table.get("page-cache-1.0.0", "/index.css").is_some());
        assert!(table.get("page-cache-1.0.0", "/missing.js").is_none());
        assert!(table.get("page-cache-1.0.0", "/unreachable.css").is_none());
    }

    #[tokio::test]
    async fn test_activate_deletes_every_other_bucket() {
        let buckets = BucketTable::shared();
        {
            let mut table = buckets.lock().await;
            table.put("page-cache-v1", "/a", CachedResponse::ok("text/plain", "a"));
            table.put("page-cache-v2", "/a", CachedResponse::ok("text/plain", "a"));
        }

        let mut worker = CacheWorker::new("v3", vec![], buckets.clone(), MapFetcher::empty());
        worker.activate().await;
        assert_eq!(worker.state(), Lifecycle::Active);

        let mut keys = buckets.lock().await.keys();
        keys.sort();
        assert_eq!(keys, vec!["page-cache-v3".to_string()]);
    }

    #[tokio::test]
    async fn test_version_probe_is_synthetic() {
        let worker = active_worker(MapFetcher::empty()).await;
        let outcome = worker.handle_fetch("GET", "/?version").await;
        assert_eq!(
            outcome,
            FetchOutcome::Respond(CachedResponse::ok(
                "text/plain",
                "/* VERSION */\"1.0.0\"/* VERSION */"
            ))
        );
        // The fetcher was never consulted.
        assert_eq!(worker.fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_api_requests_pass_through() {
        let worker = active_worker(MapFetcher::empty()).await;
        assert_eq!(
            worker.handle_fetch("GET", "/api/files").await,
            FetchOutcome::Passthrough
        );
        assert_eq!(
            worker.handle_fetch("GET", "/api/files/3/content").await,
            FetchOutcome::Passthrough
        );
    }

    #[tokio::test]
    async fn test_non_get_passes_through() {
        let worker = active_worker(MapFetcher::empty()).await;
        assert_eq!(
            worker.handle_fetch("POST", "/read.html").await,
            FetchOutcome::Passthrough
        );
    }

    #[tokio::test]
    async fn test_cache_first_after_network_fill() {
        let page = CachedResponse::ok("text/html", "<html>");
        let worker = active_worker(MapFetcher::new(&[("/read.html", page.clone())])).await;

        assert_eq!(
            worker.handle_fetch("GET", "/read.html").await,
            FetchOutcome::Respond(page.clone())
        );
        assert_eq!(worker.fetcher.calls.load(Ordering::SeqCst), 1);

        // Second hit is served from cache without touching the network.
        assert_eq!(
            worker.handle_fetch("GET", "/read.html").await,
            FetchOutcome::Respond(page)
        );
        assert_eq!(worker.fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_success_responses_are_not_cached() {
        let missing = CachedResponse {
            status: 404,
            content_type: "text/plain".to_string(),
            body: "gone".to_string(),
        };
        let worker = active_worker(MapFetcher::new(&[("/gone.html", missing.clone())])).await;

        assert_eq!(
            worker.handle_fetch("GET", "/gone.html").await,
            FetchOutcome::Respond(missing)
        );
        assert!(worker
            .buckets
            .lock()
            .await
            .get(worker.cache_key(), "/gone.html")
            .is_none());
    }

    #[tokio::test]
    async fn test_network_failure_without_cache_is_503() {
        let worker = active_worker(MapFetcher::empty()).await;
        match worker.handle_fetch("GET", "/offline.html").await {
            FetchOutcome::Respond(response) => {
                assert_eq!(response.status, 503);
                assert_eq!(response.body, "Network error occurred");
            }
            other => panic!("expected synthesized 503, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_superseded_worker_stops_intercepting() {
        let mut worker = active_worker(MapFetcher::empty()).await;
        worker.supersede();
        assert_eq!(worker.state(), Lifecycle::Superseded);
        assert_eq!(
            worker.handle_fetch("GET", "/read.html").await,
            FetchOutcome::Passthrough
        );
    }
}
