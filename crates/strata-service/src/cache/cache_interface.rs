//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use std::time::Duration;
use strata_core::{StrataError, StrataResult};

/// Cache tier holding one JSON string per key.
///
/// Implementations own connection handling and expiry. They never retry; every
/// error goes to the caller as `CacheUnavailable`.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
#[async_trait]
pub trait ProfileCache: Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> StrataResult<Option<String>>;

    /// Store a raw JSON value, applying the configured TTL.
    async fn set_raw(&self, key: &str, value: &str) -> StrataResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> StrataResult<bool>;

    /// Check that the cache answers requests.
    async fn ping(&self) -> StrataResult<()>;

    /// Release all connections. Idempotent; later calls fail with
    /// `CacheUnavailable`.
    async fn close(&self);

    /// Entry lifetime applied by `set_raw`, `None` for no expiry.
    fn ttl(&self) -> Option<Duration>;
}

/// Extension trait with typed methods for convenience.
///
/// Encoding and decoding failures are reported as `CacheUnavailable`: a value
/// the cache cannot round-trip is as good as no cache.
#[async_trait]
pub trait CacheExt: ProfileCache {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> StrataResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json).map_err(|e| {
                    StrataError::cache(format!("Failed to decode key '{}': {}", key, e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T) -> StrataResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| StrataError::cache(format!("Failed to encode key '{}': {}", key, e)))?;
        self.set_raw(key, &json).await
    }
}

// Blanket implementation for all ProfileCache implementations
impl<T: ProfileCache + ?Sized> CacheExt for T {}
