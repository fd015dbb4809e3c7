//! Server startup utilities.

use strata_config::{deployment_warnings, AppConfig, ConfigLoader, ENVIRONMENT_VAR};
use tracing::{info, warn};

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
   _____ __             __
  / ___// /__________ _/ /_____ _
  \__ \/ __/ ___/ __ `/ __/ __ `/
 ___/ / /_/ /  / /_/ / /_/ /_/ /
/____/\__/_/   \__,_/\__/\__,_/

          Profile Service
    "#);
}

/// Logs where the configuration came from and any risky settings.
///
/// Returns the number of warnings emitted.
pub fn report_config(loader: &ConfigLoader) -> usize {
    let config = loader.config();
    info!(
        "Configuration for environment '{}' ({} = {})",
        config.app.environment,
        ENVIRONMENT_VAR,
        std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "unset".to_string())
    );
    for source in loader.sources() {
        info!("Loaded config file: {}", source.display());
    }

    let warnings = deployment_warnings(config);
    for warning in &warnings {
        warn!("{}", warning);
    }
    warnings.len()
}

/// Prints the endpoints and the tiers in use.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let base = format!("http://{}", config.server.addr());

    info!("{}", separator);
    info!("Profiles:  {}/add, {}/search/{{id}}", base, base);
    info!("Health:    {}/health", base);
    info!("Ready:     {}/ready", base);
    if config.observability.metrics_enabled {
        info!("Metrics:   {}{}", base, config.observability.metrics_path);
    }
    info!(
        "Store:     {} (table {})",
        config.store.backend, config.store.table_name
    );
    info!("Cache:     {}", config.cache.backend);
    info!("{}", separator);
}
