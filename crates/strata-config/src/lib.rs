//! # Strata Config
//!
//! Configuration management for the Strata profile service.
//! Supports layered configuration from files and environment variables,
//! validated as a whole before any backend is contacted.

mod app_config;
mod backend;
mod loader;
mod validation;

pub use app_config::*;
pub use backend::*;
pub use loader::*;
pub use validation::*;
