//! Cache-first offline serving layer.
//!
//! A `CacheWorker` owns one version-keyed bucket in a table shared between
//! worker generations. Its lifecycle is explicit (`Installing`, `Active`,
//! `Superseded`), and a version bump invalidates every previous bucket on
//! activation; there is no partial migration.

pub mod bucket;
pub mod worker;

pub use bucket::{BucketTable, CachedResponse, SharedBuckets};
pub use worker::{AssetFetch, CacheWorker, FetchError, FetchOutcome, Lifecycle};
