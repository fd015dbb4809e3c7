//! Store trait definitions.

use async_trait::async_trait;
use strata_core::{Profile, StrataResult};

/// Durable key-value store holding one record per profile id.
///
/// The store is the system of record. Implementations never retry above the
/// transport layer and never touch the cache.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Ensures the backing table exists. Safe to call repeatedly.
    ///
    /// Fails with `StoreUnavailable` for anything other than "already exists".
    async fn ensure_schema(&self) -> StrataResult<()>;

    /// Writes the record unconditionally, replacing any previous value.
    ///
    /// Fails with `StoreWriteFailed`.
    async fn put(&self, profile: &Profile) -> StrataResult<()>;

    /// Looks up a record by id. Absence is `Ok(None)`, not an error.
    ///
    /// Fails with `StoreReadFailed`.
    async fn get(&self, id: &str) -> StrataResult<Option<Profile>>;

    /// Checks that the store answers requests.
    async fn health_check(&self) -> StrataResult<()>;
}
