//! Main application router.

use crate::{
    controllers::{health_controller, profile_controller},
    middleware::logging_middleware,
    state::AppState,
};
use axum::{middleware, routing::get, Router};
use strata_config::ObservabilityConfig;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Creates the main application router.
///
/// The metrics route is mounted only when metrics are enabled and the state
/// carries a Prometheus handle.
pub fn create_router(state: AppState, observability: &ObservabilityConfig) -> Router {
    let mut router = Router::new()
        .merge(health_controller::router())
        .merge(profile_controller::router());

    if observability.metrics_enabled {
        if let Some(handle) = state.metrics.clone() {
            router = router.route(
                &observability.metrics_path,
                get(move || std::future::ready(handle.render())),
            );
            info!("Prometheus metrics exposed at {}", observability.metrics_path);
        }
    }

    let router = router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with profile and health endpoints");
    router
}
