//! Process-local cache with TTL expiry.

use super::ProfileCache;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use strata_core::{StrataError, StrataResult};
use tracing::debug;

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.map_or(false, |at| now >= at)
    }
}

/// In-memory cache.
///
/// Expired entries are dropped lazily on access. Not shared between
/// processes.
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
    ttl: Option<Duration>,
    closed: AtomicBool,
}

impl InMemoryCache {
    /// Creates a cache whose entries never expire.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(None)
    }

    /// Creates a cache applying `ttl` to every write.
    #[must_use]
    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            closed: AtomicBool::new(false),
        }
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .values()
            .filter(|e| !e.is_expired(now))
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if a live entry exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .lock()
            .get(key)
            .map_or(false, |e| !e.is_expired(now))
    }

    fn ensure_open(&self) -> StrataResult<()> {
        if self.closed.load(Ordering::Acquire) {
            Err(StrataError::cache("Cache is closed"))
        } else {
            Ok(())
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileCache for InMemoryCache {
    async fn get_raw(&self, key: &str) -> StrataResult<Option<String>> {
        self.ensure_open()?;
        let now = Instant::now();
        let mut entries = self.entries.lock();

        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                debug!("Cache entry expired for key '{}'", key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: &str) -> StrataResult<()> {
        self.ensure_open()?;
        let expires_at = self.ttl.map(|ttl| Instant::now() + ttl);
        self.entries.lock().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> StrataResult<bool> {
        self.ensure_open()?;
        let now = Instant::now();
        Ok(self
            .entries
            .lock()
            .remove(key)
            .map_or(false, |e| !e.is_expired(now)))
    }

    async fn ping(&self) -> StrataResult<()> {
        self.ensure_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.entries.lock().clear();
    }

    fn ttl(&self) -> Option<Duration> {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheExt;
    use strata_core::Profile;

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = InMemoryCache::new();
        let profile = Profile::new("u1", "Ann", "ann@x.com", 30);

        cache.set("u1", &profile).await.unwrap();

        assert_eq!(cache.get::<Profile>("u1").await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let cache = InMemoryCache::new();
        assert_eq!(cache.get::<Profile>("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = InMemoryCache::with_ttl(Some(Duration::from_millis(20)));
        cache.set_raw("k", "\"v\"").await.unwrap();
        assert!(cache.contains("k"));

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(cache.get_raw("k").await.unwrap(), None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let cache = InMemoryCache::new();
        cache.set_raw("k", "1").await.unwrap();

        assert!(cache.delete("k").await.unwrap());
        assert!(!cache.delete("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_undecodable_value_is_cache_unavailable() {
        let cache = InMemoryCache::new();
        cache.set_raw("u1", "not json").await.unwrap();

        assert!(matches!(
            cache.get::<Profile>("u1").await,
            Err(StrataError::CacheUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_final() {
        let cache = InMemoryCache::new();
        cache.close().await;
        cache.close().await;

        assert!(cache.ping().await.is_err());
        assert!(matches!(
            cache.set_raw("k", "1").await,
            Err(StrataError::CacheUnavailable(_))
        ));
    }
}
