//! Application configuration structures.

use crate::{CacheBackend, StoreBackend};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Cache tier configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Durable store configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "strata-profiles".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Grace period after the listener stops, before the process exits.
    pub shutdown_grace_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_grace_ms: 1000,
        }
    }
}

impl ServerConfig {
    /// Returns the listen address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the shutdown grace period as a Duration.
    #[must_use]
    pub const fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

/// Cache tier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache implementation.
    pub backend: CacheBackend,
    /// Redis host.
    pub host: String,
    /// Redis port.
    pub port: u16,
    /// Redis password. Empty means no AUTH.
    pub password: String,
    /// Idle connections kept in the pool; extras are closed by the reaper.
    pub pool_max_idle: usize,
    /// Upper bound on live connections. Borrowers wait when it is reached.
    pub pool_max_active: usize,
    /// Idle connections older than this are closed. 0 disables the reaper.
    pub pool_idle_timeout_secs: u64,
    /// Timeout for establishing a new connection.
    pub connect_timeout_ms: u64,
    /// Entry lifetime. 0 stores entries without expiry.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Redis,
            host: "localhost".to_string(),
            port: 6379,
            password: String::new(),
            pool_max_idle: 10,
            pool_max_active: 100,
            pool_idle_timeout_secs: 240,
            connect_timeout_ms: 2000,
            ttl_secs: 0,
        }
    }
}

impl CacheConfig {
    /// Returns the Redis URL without credentials.
    #[must_use]
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}", self.host, self.port)
    }

    /// Returns the idle timeout, or `None` if idle connections never expire.
    #[must_use]
    pub const fn idle_timeout(&self) -> Option<Duration> {
        if self.pool_idle_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.pool_idle_timeout_secs))
        }
    }

    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Returns the entry TTL, or `None` if entries never expire.
    #[must_use]
    pub const fn ttl(&self) -> Option<Duration> {
        if self.ttl_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.ttl_secs))
        }
    }
}

/// Durable store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store implementation.
    pub backend: StoreBackend,
    /// Endpoint override, e.g. `http://localhost:8000` for DynamoDB Local.
    /// Empty uses the regional AWS endpoint.
    pub endpoint: String,
    /// AWS region.
    pub region: String,
    /// Table holding one item per profile.
    pub table_name: String,
    /// Provisioned read capacity, used only when the table is created.
    pub read_capacity: i64,
    /// Provisioned write capacity, used only when the table is created.
    pub write_capacity: i64,
    /// Total SDK attempts per call, including the first.
    pub max_attempts: u32,
    /// Ceiling for the SDK's exponential backoff.
    pub max_backoff_secs: u64,
    /// How long startup waits for the table to become ACTIVE.
    pub table_ready_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Dynamo,
            endpoint: String::new(),
            region: "us-east-1".to_string(),
            table_name: "Profiles".to_string(),
            read_capacity: 10,
            write_capacity: 10,
            max_attempts: 3,
            max_backoff_secs: 60,
            table_ready_timeout_secs: 120,
        }
    }
}

impl StoreConfig {
    /// Returns the endpoint override, if any.
    #[must_use]
    pub fn endpoint_url(&self) -> Option<&str> {
        if self.endpoint.is_empty() {
            None
        } else {
            Some(&self.endpoint)
        }
    }

    /// Returns the backoff ceiling as a Duration.
    #[must_use]
    pub const fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_secs)
    }

    /// Returns the table readiness deadline as a Duration.
    #[must_use]
    pub const fn table_ready_timeout(&self) -> Duration {
        Duration::from_secs(self.table_ready_timeout_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (json, pretty).
    pub log_format: String,
    /// Enable the Prometheus endpoint.
    pub metrics_enabled: bool,
    /// Metrics endpoint path.
    pub metrics_path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: true,
            metrics_path: "/metrics".to_string(),
        }
    }
}
