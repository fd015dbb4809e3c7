//! Unified error types for all layers of the service.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for Strata.
///
/// Variants are grouped by the tier that produced them. The profile service
/// decides which of them reach a caller: cache failures on the read path are
/// absorbed, everything else is surfaced.
#[derive(Error, Debug)]
pub enum StrataError {
    // ============ Domain Errors ============
    /// The record was rejected before reaching either tier.
    #[error("Invalid record: {0}")]
    InvalidInput(String),

    /// Authoritative absence in the durable store.
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    // ============ Durable Store Errors ============
    /// Session establishment or schema provisioning failed.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A point write to the durable store failed.
    #[error("Store write failed: {0}")]
    StoreWriteFailed(String),

    /// A point read from the durable store failed.
    #[error("Store read failed: {0}")]
    StoreReadFailed(String),

    // ============ Cache Errors ============
    /// Transport or serialization failure talking to the cache.
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// The store accepted a write but the cache did not.
    #[error("Cache write failed: {0}")]
    CacheWriteFailed(String),

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StrataError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound { .. } => 404,
            Self::StoreUnavailable(_) | Self::CacheUnavailable(_) | Self::CacheWriteFailed(_) => 503,
            Self::StoreWriteFailed(_)
            | Self::StoreReadFailed(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::StoreWriteFailed(_) => "STORE_WRITE_FAILED",
            Self::StoreReadFailed(_) => "STORE_READ_FAILED",
            Self::CacheUnavailable(_) => "CACHE_UNAVAILABLE",
            Self::CacheWriteFailed(_) => "CACHE_WRITE_FAILED",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input<T: Into<String>>(message: T) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a cache unavailable error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::CacheUnavailable(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

impl From<serde_json::Error> for StrataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `StrataError`.
    #[must_use]
    pub fn from_error(error: &StrataError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&StrataError> for ErrorResponse {
    fn from(error: &StrataError) -> Self {
        Self::from_error(error)
    }
}
