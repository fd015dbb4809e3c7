//! Caching infrastructure for the service layer.
//!
//! The cache tier stores one JSON-encoded profile per id. Redis is the
//! production backend; the in-memory backend serves tests and single-process
//! runs.

mod cache_interface;
mod idle_probe;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, ProfileCache};
pub use idle_probe::{IdleProbeManager, ProbedPool, PROBE_AFTER_IDLE};
pub use memory_cache::InMemoryCache;
pub use redis_cache::RedisCacheService;

use std::sync::Arc;
use strata_config::{CacheBackend, CacheConfig};
use strata_core::StrataResult;
use tracing::info;

/// Builds the configured cache.
pub fn create_cache(config: &CacheConfig) -> StrataResult<Arc<dyn ProfileCache>> {
    match config.backend {
        CacheBackend::Redis => Ok(Arc::new(RedisCacheService::connect(config)?)),
        CacheBackend::Memory => {
            info!("Using in-memory cache");
            Ok(Arc::new(InMemoryCache::with_ttl(config.ttl())))
        }
    }
}
