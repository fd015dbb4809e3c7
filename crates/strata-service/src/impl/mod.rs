//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `profile_service.rs`).

pub mod profile_service_impl;

pub use profile_service_impl::ProfileServiceImpl;
