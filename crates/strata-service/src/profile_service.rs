//! Profile service trait definition.

use async_trait::async_trait;
use serde::Serialize;
use strata_core::{Profile, StrataResult};

/// Cache-aside access to profile records.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Writes the record to the store, then to the cache.
    ///
    /// A store failure leaves the cache untouched. A cache failure after a
    /// successful store write is still reported as `CacheWriteFailed`.
    async fn save_profile(&self, profile: Profile) -> StrataResult<Profile>;

    /// Reads a record, consulting the cache before the store.
    async fn get_profile(&self, id: &str) -> StrataResult<Profile>;

    /// Drops the cached copy of a record. The store is never touched.
    ///
    /// Returns whether an entry existed.
    async fn evict_profile(&self, id: &str) -> StrataResult<bool>;

    /// Probes both tiers.
    async fn readiness(&self) -> Readiness;
}

/// Health of one storage tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TierStatus {
    #[must_use]
    pub fn up() -> Self {
        Self {
            status: "up",
            error: None,
        }
    }

    #[must_use]
    pub fn down(error: impl Into<String>) -> Self {
        Self {
            status: "down",
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn is_up(&self) -> bool {
        self.error.is_none()
    }
}

/// Health of both tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readiness {
    pub store: TierStatus,
    pub cache: TierStatus,
}

impl Readiness {
    /// True when both tiers respond.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.store.is_up() && self.cache.is_up()
    }
}
