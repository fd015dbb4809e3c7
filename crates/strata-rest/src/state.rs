//! Application state for Axum handlers.

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use strata_service::ProfileService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub profile_service: Arc<dyn ProfileService>,
    /// Renders the Prometheus exposition. `None` when metrics are disabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(profile_service: Arc<dyn ProfileService>) -> Self {
        Self {
            profile_service,
            metrics: None,
        }
    }

    /// Attaches a Prometheus handle.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
