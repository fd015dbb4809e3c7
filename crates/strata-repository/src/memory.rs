//! In-memory profile store.

use crate::traits::ProfileStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use strata_core::{Profile, StrataResult};
use tracing::debug;

/// Process-local store with the same semantics as the DynamoDB store.
///
/// Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl InMemoryProfileStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with records.
    #[must_use]
    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let store = Self::new();
        {
            let mut map = store.profiles.write();
            for profile in profiles {
                map.insert(profile.id.clone(), profile);
            }
        }
        store
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.read().is_empty()
    }

    /// Returns a stored record without going through the async interface.
    #[must_use]
    pub fn snapshot(&self, id: &str) -> Option<Profile> {
        self.profiles.read().get(id).cloned()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn ensure_schema(&self) -> StrataResult<()> {
        Ok(())
    }

    async fn put(&self, profile: &Profile) -> StrataResult<()> {
        self.profiles
            .write()
            .insert(profile.id.clone(), profile.clone());
        debug!(id = %profile.id, "Stored profile in memory");
        Ok(())
    }

    async fn get(&self, id: &str) -> StrataResult<Option<Profile>> {
        Ok(self.profiles.read().get(id).cloned())
    }

    async fn health_check(&self) -> StrataResult<()> {
        Ok(())
    }
}
