//! Backend selection for the two storage tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which implementation backs the cache tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Pooled Redis connections.
    #[default]
    Redis,
    /// Process-local map with TTL expiry. Not shared between replicas.
    Memory,
}

impl CacheBackend {
    /// Returns true if the backend talks to a remote server.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Redis)
    }
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redis => write!(f, "redis"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Which implementation backs the durable store tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Amazon DynamoDB (or a local DynamoDB endpoint).
    #[default]
    Dynamo,
    /// Process-local map. Data does not survive a restart.
    Memory,
}

impl StoreBackend {
    /// Returns true if the backend talks to a remote server.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Dynamo)
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dynamo => write!(f, "dynamo"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_defaults() {
        assert_eq!(CacheBackend::default(), CacheBackend::Redis);
        assert_eq!(StoreBackend::default(), StoreBackend::Dynamo);
    }

    #[test]
    fn test_backend_display_matches_serde() {
        let json = serde_json::to_string(&StoreBackend::Memory).unwrap();
        assert_eq!(json, format!("\"{}\"", StoreBackend::Memory));
        let parsed: CacheBackend = serde_json::from_str("\"memory\"").unwrap();
        assert_eq!(parsed, CacheBackend::Memory);
        assert!(!parsed.is_remote());
    }
}
