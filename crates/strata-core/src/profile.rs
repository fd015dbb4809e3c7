//! The profile record exchanged between every layer.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One user's stored profile.
///
/// `id` is the sole key in both the durable store and the cache. Every other
/// field is overwritten wholesale on each write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Profile {
    /// Unique identifier. Must be non-empty before the record reaches a tier.
    #[serde(default)]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub age: i64,
}

impl Profile {
    /// Creates a new profile record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        age: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            age,
        }
    }
}
