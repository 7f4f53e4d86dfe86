//! Short-lived quote cache.
//!
//! Keyed by the hash of the request body (see [`crate::request::cache_key`]).
//! Backed by `moka`, which is safe for concurrent readers and writers and never
//! returns an entry past its time-to-live.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::response::Quote;

const MAX_ENTRIES: u64 = 10_000;

/// Cache of successful, non-empty quote lists.
#[derive(Clone)]
pub struct QuoteCache {
    inner: Cache<String, Arc<Vec<Quote>>>,
}

impl QuoteCache {
    /// Create a cache whose entries expire `ttl` after insertion.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ttl)
            .build();

        Self { inner }
    }

    /// Look up a live entry.
    pub async fn get(&self, key: &str) -> Option<Arc<Vec<Quote>>> {
        self.inner.get(key).await
    }

    /// Store a quote list. Empty lists are not stored.
    ///
    /// Returns whether the entry was stored.
    pub async fn insert(&self, key: String, quotes: Vec<Quote>) -> bool {
        if quotes.is_empty() {
            return false;
        }
        self.inner.insert(key, Arc::new(quotes)).await;
        true
    }
}
