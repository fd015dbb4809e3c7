//! Logging and metrics recorder setup.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use strata_config::ObservabilityConfig;
use strata_core::{StrataError, StrataResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the log filter.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to the
/// application crates and HTTP tracing, with dependencies held at `warn`.
pub fn log_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.log_level;
        EnvFilter::new(format!(
            "warn,strata={level},strata_server={level},strata_rest={level},\
             strata_service={level},strata_repository={level},strata_config={level},\
             http={level},tower_http={level}"
        ))
    })
}

/// Installs the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = log_filter(config);
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Installs the Prometheus recorder and describes the service's metrics.
///
/// Returns `None` when metrics are disabled.
pub fn init_metrics(config: &ObservabilityConfig) -> StrataResult<Option<PrometheusHandle>> {
    if !config.metrics_enabled {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| StrataError::internal(format!("Failed to install metrics recorder: {e}")))?;
    strata_service::metrics::register_metrics();

    Ok(Some(handle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_metrics_install_nothing() {
        let config = ObservabilityConfig {
            metrics_enabled: false,
            ..ObservabilityConfig::default()
        };
        assert!(init_metrics(&config).unwrap().is_none());
    }

    #[test]
    fn test_log_filter_uses_configured_level() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = ObservabilityConfig {
            log_level: "debug".to_string(),
            ..ObservabilityConfig::default()
        };
        let filter = log_filter(&config).to_string();
        assert!(filter.contains("strata_service=debug"));
        assert!(filter.contains("http=debug"));
    }
}
