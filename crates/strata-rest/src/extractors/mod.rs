//! Custom request extractors.

mod validated;

pub use validated::ValidatedJson;
