//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use std::path::{Path, PathBuf};
use strata_core::StrataError;

/// Environment variable selecting the environment-specific config file.
pub const ENVIRONMENT_VAR: &str = "STRATA_ENVIRONMENT";

/// Validated configuration plus the files it was built from.
///
/// Loading runs before logging is installed, so the loader records what it
/// read instead of logging it; see [`ConfigLoader::sources`].
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
    sources: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Loads configuration from `config_dir`.
    ///
    /// Sources are layered in order:
    /// 1. `default.toml` - Default values
    /// 2. `{environment}.toml` - Environment-specific overrides
    /// 3. `local.toml` - Uncommitted local overrides
    /// 4. Environment variables with `STRATA_` prefix
    pub fn new(config_dir: impl AsRef<Path>) -> Result<Self, StrataError> {
        // Missing .env is the common case.
        let _ = dotenvy::dotenv();

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());

        let mut builder = Config::builder();
        let mut sources = Vec::new();

        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.as_ref().join(format!("{}.toml", name));
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()).required(false));
                sources.push(path);
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("STRATA")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_strata_error)?;

        if let Err(errors) = ConfigValidator::validate(&config) {
            return Err(StrataError::Configuration(format_validation_errors(&errors)));
        }

        Ok(Self { config, sources })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, StrataError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Files that contributed, in the order they were layered.
    #[must_use]
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }
}

/// Settings that are valid but risky for the configured environment.
///
/// Returned rather than logged so the caller can report them once logging
/// is up.
#[must_use]
pub fn deployment_warnings(config: &AppConfig) -> Vec<&'static str> {
    let mut warnings = Vec::new();
    if config.app.environment == "production" {
        if !config.cache.backend.is_remote() {
            warnings.push(
                "In-memory cache configured in production; entries are not shared between replicas",
            );
        }
        if !config.store.backend.is_remote() {
            warnings.push(
                "In-memory store configured in production; profiles will not survive a restart",
            );
        }
    }
    warnings
}

fn config_error_to_strata_error(err: ConfigError) -> StrataError {
    StrataError::Configuration(err.to_string())
}
