//! Shared fixtures for HTTP integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use strata_config::ObservabilityConfig;
use strata_core::{Profile, StrataError, StrataResult};
use strata_repository::{InMemoryProfileStore, ProfileStore};
use strata_rest::{create_router, AppState};
use strata_service::{InMemoryCache, ProfileCache, ProfileServiceImpl};
use tower::ServiceExt;

/// Router over in-memory tiers, with handles to inspect them.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryProfileStore>,
    pub cache: Arc<InMemoryCache>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryProfileStore::new());
        let cache = Arc::new(InMemoryCache::new());
        let router = router_over(store.clone(), cache.clone());
        Self {
            router,
            store,
            cache,
        }
    }
}

/// Builds a router over arbitrary tiers with metrics disabled.
pub fn router_over(store: Arc<dyn ProfileStore>, cache: Arc<dyn ProfileCache>) -> Router {
    let service = Arc::new(ProfileServiceImpl::new(store, cache));
    let observability = ObservabilityConfig {
        metrics_enabled: false,
        ..ObservabilityConfig::default()
    };
    create_router(AppState::new(service), &observability)
}

/// Sends a request and returns status plus the body parsed as JSON (or
/// `Value::Null` for an empty or non-JSON body).
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (u16, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub fn profile_json(profile: &Profile) -> String {
    serde_json::to_string(profile).unwrap()
}

/// Store whose every call fails.
pub struct FailingStore;

#[async_trait]
impl ProfileStore for FailingStore {
    async fn ensure_schema(&self) -> StrataResult<()> {
        Err(StrataError::StoreUnavailable("unreachable".to_string()))
    }

    async fn put(&self, _profile: &Profile) -> StrataResult<()> {
        Err(StrataError::StoreWriteFailed("throttled".to_string()))
    }

    async fn get(&self, _id: &str) -> StrataResult<Option<Profile>> {
        Err(StrataError::StoreReadFailed("timeout".to_string()))
    }

    async fn health_check(&self) -> StrataResult<()> {
        Err(StrataError::StoreUnavailable("unreachable".to_string()))
    }
}

/// Cache whose every call fails.
pub struct FailingCache;

#[async_trait]
impl ProfileCache for FailingCache {
    async fn get_raw(&self, _key: &str) -> StrataResult<Option<String>> {
        Err(StrataError::cache("connection refused"))
    }

    async fn set_raw(&self, _key: &str, _value: &str) -> StrataResult<()> {
        Err(StrataError::cache("connection refused"))
    }

    async fn delete(&self, _key: &str) -> StrataResult<bool> {
        Err(StrataError::cache("connection refused"))
    }

    async fn ping(&self) -> StrataResult<()> {
        Err(StrataError::cache("connection refused"))
    }

    async fn close(&self) {}

    fn ttl(&self) -> Option<Duration> {
        None
    }
}
