//! # Strata Core
//!
//! Core types and error definitions for the Strata profile service.
//! Every other crate in the workspace speaks in terms of the [`Profile`]
//! record and the [`StrataError`] taxonomy defined here.

pub mod error;
pub mod profile;
pub mod result;
pub mod validation;

pub use error::*;
pub use profile::*;
pub use result::*;
pub use validation::*;
