//! Application assembly and lifecycle.

use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use std::future::Future;
use std::sync::Arc;
use strata_config::AppConfig;
use strata_core::{StrataError, StrataResult};
use strata_repository::{create_store, ProfileStore};
use strata_rest::{create_router, AppState};
use strata_service::{create_cache, ProfileCache, ProfileService, ProfileServiceImpl};
use tracing::{error, info};

/// A fully wired server, ready to accept connections.
pub struct App {
    config: AppConfig,
    store: Arc<dyn ProfileStore>,
    cache: Arc<dyn ProfileCache>,
    router: Router,
}

impl App {
    /// Builds both tiers and the HTTP router.
    ///
    /// The store schema is ensured here; a failure aborts startup.
    pub async fn build(config: AppConfig, metrics: Option<PrometheusHandle>) -> StrataResult<Self> {
        let store = create_store(&config.store).await?;
        if let Err(e) = store.ensure_schema().await {
            error!("Failed to ensure store schema: {}", e);
            return Err(e);
        }

        let cache = create_cache(&config.cache)?;

        let service: Arc<dyn ProfileService> =
            Arc::new(ProfileServiceImpl::new(store.clone(), cache.clone()));

        let mut state = AppState::new(service);
        if let Some(handle) = metrics {
            state = state.with_metrics(handle);
        }

        let router = create_router(state, &config.observability);

        Ok(Self {
            config,
            store,
            cache,
            router,
        })
    }

    /// Returns the HTTP router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Returns the store tier.
    pub fn store(&self) -> Arc<dyn ProfileStore> {
        self.store.clone()
    }

    /// Returns the cache tier.
    pub fn cache(&self) -> Arc<dyn ProfileCache> {
        self.cache.clone()
    }

    /// Serves until `shutdown` resolves, then releases the cache pool and
    /// waits out the grace period.
    pub async fn serve<F>(self, shutdown: F) -> StrataResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| StrataError::internal(format!("Failed to bind {}: {}", addr, e)))?;

        info!("Listening on http://{}", addr);

        let served = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| StrataError::internal(format!("HTTP server error: {}", e)));

        self.cache.close().await;

        let grace = self.config.server.shutdown_grace();
        if !grace.is_zero() {
            info!("Waiting {:?} before exit", grace);
            tokio::time::sleep(grace).await;
        }

        served
    }
}
