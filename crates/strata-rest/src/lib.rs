//! # Strata REST
//!
//! HTTP surface of the profile service, built on Axum.
//! Provides the profile write, lookup and cache-eviction endpoints plus
//! liveness, health and readiness checks.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
