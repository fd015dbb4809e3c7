//! Configuration validation module.
//!
//! Checks every section up front and reports all problems in one pass,
//! so a bad deployment fails at startup rather than on the first request.

use crate::AppConfig;
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// More idle connections requested than the pool may hold.
    InvalidPoolSize { max_idle: usize, max_active: usize },
    /// Pool size exceeds maximum allowed.
    PoolSizeTooLarge { value: usize, maximum: usize },
    /// Pool must allow at least one connection.
    EmptyPool,
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String, value: u64 },
    /// Provisioned capacity must be at least one unit.
    InvalidCapacity { name: String, value: i64 },
    /// The SDK must be allowed at least one attempt.
    InvalidMaxAttempts { value: u32 },
    /// Required text setting is empty.
    MissingValue { name: String },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Log format is invalid.
    InvalidLogFormat { value: String },
    /// Metrics path must be an absolute route.
    InvalidMetricsPath { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::InvalidPoolSize { max_idle, max_active } => {
                write!(
                    f,
                    "Invalid pool size: max idle ({}) cannot be greater than max active ({})",
                    max_idle, max_active
                )
            }
            Self::PoolSizeTooLarge { value, maximum } => {
                write!(f, "Pool size {} exceeds maximum allowed ({})", value, maximum)
            }
            Self::EmptyPool => write!(f, "cache.pool_max_active must be at least 1"),
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveTimeout { name, value } => {
                write!(f, "Timeout '{}' must be positive, got {}", name, value)
            }
            Self::InvalidCapacity { name, value } => {
                write!(f, "Capacity '{}' must be at least 1, got {}", name, value)
            }
            Self::InvalidMaxAttempts { value } => {
                write!(f, "store.max_attempts must be at least 1, got {}", value)
            }
            Self::MissingValue { name } => write!(f, "'{}' cannot be empty", name),
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
            Self::InvalidLogFormat { value } => {
                write!(f, "Invalid log format: '{}' (valid: json, pretty)", value)
            }
            Self::InvalidMetricsPath { value } => {
                write!(
                    f,
                    "Invalid metrics path: '{}' (must start with '/' and not clash with an API route)",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Result of configuration validation containing all errors found.
#[derive(Debug)]
pub struct ValidationResult {
    errors: Vec<ConfigValidationError>,
}

impl ValidationResult {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    fn add_error(&mut self, error: ConfigValidationError) {
        self.errors.push(error);
    }

    /// Returns true if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the validation errors.
    #[must_use]
    pub fn errors(&self) -> &[ConfigValidationError] {
        &self.errors
    }

    /// Converts to Result, returning Err with all errors if any exist.
    pub fn into_result(self) -> Result<(), Vec<ConfigValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: usize = 1000;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];
    /// Valid log formats.
    const VALID_LOG_FORMATS: &'static [&'static str] = &["json", "pretty"];
    /// Routes owned by the API that the metrics endpoint must not shadow.
    const RESERVED_ROUTES: &'static [&'static str] = &["/", "/add", "/health", "/ready"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut result = ValidationResult::new();

        Self::validate_server(&config.server, &mut result);
        Self::validate_cache(&config.cache, &mut result);
        Self::validate_store(&config.store, &mut result);
        Self::validate_observability(&config.observability, &mut result);

        result.into_result()
    }

    fn validate_server(config: &crate::ServerConfig, result: &mut ValidationResult) {
        // 0 is invalid for binding
        if config.port == 0 {
            result.add_error(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: config.port,
            });
        }
    }

    fn validate_cache(config: &crate::CacheConfig, result: &mut ValidationResult) {
        if !config.backend.is_remote() {
            return;
        }

        if config.host.is_empty() {
            result.add_error(ConfigValidationError::MissingValue {
                name: "cache.host".to_string(),
            });
        }
        if config.port == 0 {
            result.add_error(ConfigValidationError::InvalidPort {
                name: "cache.port".to_string(),
                value: config.port,
            });
        }
        if Url::parse(&config.redis_url()).is_err() {
            result.add_error(ConfigValidationError::InvalidUrl {
                url_type: "redis".to_string(),
                message: format!("cannot build a URL from host '{}'", config.host),
            });
        }

        if config.pool_max_active == 0 {
            result.add_error(ConfigValidationError::EmptyPool);
        }
        if config.pool_max_idle > config.pool_max_active {
            result.add_error(ConfigValidationError::InvalidPoolSize {
                max_idle: config.pool_max_idle,
                max_active: config.pool_max_active,
            });
        }
        if config.pool_max_active > Self::MAX_POOL_SIZE {
            result.add_error(ConfigValidationError::PoolSizeTooLarge {
                value: config.pool_max_active,
                maximum: Self::MAX_POOL_SIZE,
            });
        }

        if config.connect_timeout_ms == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "cache.connect_timeout_ms".to_string(),
                value: 0,
            });
        }
    }

    fn validate_store(config: &crate::StoreConfig, result: &mut ValidationResult) {
        if config.table_name.is_empty() {
            result.add_error(ConfigValidationError::MissingValue {
                name: "store.table_name".to_string(),
            });
        }

        if !config.backend.is_remote() {
            return;
        }

        if config.region.is_empty() {
            result.add_error(ConfigValidationError::MissingValue {
                name: "store.region".to_string(),
            });
        }

        if let Some(endpoint) = config.endpoint_url() {
            match Url::parse(endpoint) {
                Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
                Ok(url) => result.add_error(ConfigValidationError::InvalidUrl {
                    url_type: "store endpoint".to_string(),
                    message: format!("unsupported scheme '{}'", url.scheme()),
                }),
                Err(e) => result.add_error(ConfigValidationError::InvalidUrl {
                    url_type: "store endpoint".to_string(),
                    message: format!("{}: {}", endpoint, e),
                }),
            }
        }

        if config.read_capacity < 1 {
            result.add_error(ConfigValidationError::InvalidCapacity {
                name: "store.read_capacity".to_string(),
                value: config.read_capacity,
            });
        }
        if config.write_capacity < 1 {
            result.add_error(ConfigValidationError::InvalidCapacity {
                name: "store.write_capacity".to_string(),
                value: config.write_capacity,
            });
        }

        if config.max_attempts == 0 {
            result.add_error(ConfigValidationError::InvalidMaxAttempts { value: 0 });
        }
        if config.max_backoff_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "store.max_backoff_secs".to_string(),
                value: 0,
            });
        }
        if config.table_ready_timeout_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "store.table_ready_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_observability(config: &crate::ObservabilityConfig, result: &mut ValidationResult) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            result.add_error(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }

        let format = config.log_format.to_lowercase();
        if !Self::VALID_LOG_FORMATS.contains(&format.as_str()) {
            result.add_error(ConfigValidationError::InvalidLogFormat {
                value: config.log_format.clone(),
            });
        }

        if config.metrics_enabled
            && (!config.metrics_path.starts_with('/')
                || Self::RESERVED_ROUTES.contains(&config.metrics_path.as_str())
                || config.metrics_path.starts_with("/search/")
                || config.metrics_path.starts_with("/cache/"))
        {
            result.add_error(ConfigValidationError::InvalidMetricsPath {
                value: config.metrics_path.clone(),
            });
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
