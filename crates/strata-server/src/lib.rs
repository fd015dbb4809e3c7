//! # Strata Server Library
//!
//! Wiring for the Strata profile server: logging setup, tier construction
//! and the serve/shutdown lifecycle.

pub mod app;
pub mod startup;
pub mod telemetry;
