//! Cache-aside profile service.

use crate::cache::{CacheExt, ProfileCache};
use crate::metrics::ProfileMetrics;
use crate::profile_service::{ProfileService, Readiness, TierStatus};
use async_trait::async_trait;
use std::sync::Arc;
use strata_core::{Profile, StrataError, StrataResult, ValidateExt};
use strata_repository::ProfileStore;
use tracing::{debug, info, warn};

/// Resource name used in `NotFound` errors.
const PROFILE: &str = "Profile";

/// Profile service over a durable store and a cache.
///
/// Holds no per-request state. Both tiers are shared handles, safe for
/// concurrent use.
pub struct ProfileServiceImpl {
    store: Arc<dyn ProfileStore>,
    cache: Arc<dyn ProfileCache>,
}

impl ProfileServiceImpl {
    /// Creates a new profile service.
    pub fn new(store: Arc<dyn ProfileStore>, cache: Arc<dyn ProfileCache>) -> Self {
        Self { store, cache }
    }

    /// Writes the record back into the cache after a store hit. Failures are
    /// logged and swallowed; the next read simply misses again.
    async fn repopulate(&self, profile: &Profile) {
        match self.cache.set(&profile.id, profile).await {
            Ok(()) => {
                ProfileMetrics::cache_repopulated("ok");
                debug!(id = %profile.id, "Cache repopulated from store");
            }
            Err(e) => {
                ProfileMetrics::cache_repopulated("error");
                warn!(id = %profile.id, error = %e, "Failed to repopulate cache");
            }
        }
    }
}

#[async_trait]
impl ProfileService for ProfileServiceImpl {
    async fn save_profile(&self, profile: Profile) -> StrataResult<Profile> {
        debug!("Saving profile: {}", profile.id);

        profile.validate_request()?;

        if let Err(e) = self.store.put(&profile).await {
            ProfileMetrics::store_write("error");
            warn!(id = %profile.id, error = %e, "Store write failed; cache left untouched");
            return Err(as_store_write_failure(e));
        }
        ProfileMetrics::store_write("ok");

        if let Err(e) = self.cache.set(&profile.id, &profile).await {
            ProfileMetrics::cache_error("set");
            warn!(id = %profile.id, error = %e, "Cache write failed after store write");
            return Err(StrataError::CacheWriteFailed(e.to_string()));
        }

        info!("Profile saved: {}", profile.id);
        Ok(profile)
    }

    async fn get_profile(&self, id: &str) -> StrataResult<Profile> {
        debug!("Getting profile: {}", id);

        // Try cache first
        match self.cache.get::<Profile>(id).await {
            Ok(Some(profile)) => {
                ProfileMetrics::cache_hit();
                debug!("Profile {} served from cache", id);
                return Ok(profile);
            }
            Ok(None) => ProfileMetrics::cache_miss(),
            Err(e) => {
                ProfileMetrics::cache_error("get");
                ProfileMetrics::cache_miss();
                warn!(id, error = %e, "Cache read failed; falling back to store");
            }
        }

        match self.store.get(id).await {
            Ok(Some(profile)) => {
                ProfileMetrics::store_read("hit");
                self.repopulate(&profile).await;
                Ok(profile)
            }
            Ok(None) => {
                ProfileMetrics::store_read("miss");
                Err(StrataError::not_found(PROFILE, id))
            }
            Err(e) => {
                ProfileMetrics::store_read("error");
                warn!(id, error = %e, "Store read failed");
                Err(as_store_read_failure(e))
            }
        }
    }

    async fn evict_profile(&self, id: &str) -> StrataResult<bool> {
        match self.cache.delete(id).await {
            Ok(evicted) => {
                info!("Evicted profile {} from cache: {}", id, evicted);
                Ok(evicted)
            }
            Err(e) => {
                ProfileMetrics::cache_error("delete");
                Err(match e {
                    StrataError::CacheUnavailable(_) => e,
                    other => StrataError::cache(other.to_string()),
                })
            }
        }
    }

    async fn readiness(&self) -> Readiness {
        let (store, cache) = tokio::join!(self.store.health_check(), self.cache.ping());
        Readiness {
            store: store.map_or_else(|e| TierStatus::down(e.to_string()), |()| TierStatus::up()),
            cache: cache.map_or_else(|e| TierStatus::down(e.to_string()), |()| TierStatus::up()),
        }
    }
}

fn as_store_write_failure(err: StrataError) -> StrataError {
    match err {
        StrataError::StoreWriteFailed(_) => err,
        other => StrataError::StoreWriteFailed(other.to_string()),
    }
}

fn as_store_read_failure(err: StrataError) -> StrataError {
    match err {
        StrataError::StoreReadFailed(_) => err,
        other => StrataError::StoreReadFailed(other.to_string()),
    }
}
