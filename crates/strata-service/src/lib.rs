//! # Strata Service
//!
//! The cache-aside protocol between the durable store and the cache.
//!
//! Writes go to the store first and then to the cache. Reads consult the cache
//! and fall back to the store on a miss, repopulating the cache on a store
//! hit. The two tiers are not updated atomically: a failure between them is
//! reported to the caller and repaired by the next read.

pub mod cache;
pub mod r#impl;
pub mod metrics;
pub mod profile_service;

pub use cache::*;
pub use profile_service::*;
pub use r#impl::ProfileServiceImpl;
