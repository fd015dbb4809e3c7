//! End-to-end tests of the profile endpoints over in-memory tiers.

mod common;

use common::{profile_json, router_over, send, FailingCache, FailingStore, TestApp};
use std::sync::Arc;
use strata_core::Profile;
use strata_repository::InMemoryProfileStore;
use strata_service::{CacheExt, InMemoryCache};

fn ann() -> Profile {
    Profile::new("u1", "Ann", "ann@x.com", 30)
}

#[tokio::test]
async fn test_add_returns_record() {
    let app = TestApp::new();

    let (status, body) = send(&app.router, "POST", "/add", Some(&profile_json(&ann()))).await;

    assert_eq!(status, 200);
    assert_eq!(body, serde_json::to_value(ann()).unwrap());
    assert_eq!(app.store.snapshot("u1"), Some(ann()));
    assert!(app.cache.contains("u1"));
}

#[tokio::test]
async fn test_add_search_evict_search_scenario() {
    let app = TestApp::new();
    let expected = serde_json::to_value(ann()).unwrap();

    let (status, _) = send(&app.router, "POST", "/add", Some(&profile_json(&ann()))).await;
    assert_eq!(status, 200);

    let (status, body) = send(&app.router, "GET", "/search/u1", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, expected);

    let (status, body) = send(&app.router, "DELETE", "/cache/u1", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!({"id": "u1", "evicted": true}));
    assert!(!app.cache.contains("u1"));

    let (status, body) = send(&app.router, "GET", "/search/u1", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, expected);
    assert_eq!(app.cache.get::<Profile>("u1").await.unwrap(), Some(ann()));
}

#[tokio::test]
async fn test_search_unknown_id_is_404_and_creates_nothing() {
    let app = TestApp::new();

    let (status, body) = send(&app.router, "GET", "/search/does-not-exist", None).await;

    assert_eq!(status, 404);
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(app.store.is_empty());
    assert!(app.cache.is_empty());
}

#[tokio::test]
async fn test_add_defaults_missing_fields() {
    let app = TestApp::new();

    let (status, body) = send(&app.router, "POST", "/add", Some(r#"{"id":"u2"}"#)).await;

    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!({"id": "u2", "name": "", "email": "", "age": 0}));
}

#[tokio::test]
async fn test_add_rejects_empty_or_missing_id() {
    let app = TestApp::new();

    for body in [r#"{"id":"","name":"Ann"}"#, r#"{"name":"Ann"}"#] {
        let (status, json) = send(&app.router, "POST", "/add", Some(body)).await;
        assert_eq!(status, 400);
        assert_eq!(json["code"], "INVALID_INPUT");
    }

    assert!(app.store.is_empty());
    assert!(app.cache.is_empty());
}

#[tokio::test]
async fn test_add_rejects_malformed_json() {
    let app = TestApp::new();

    let (status, body) = send(&app.router, "POST", "/add", Some("{\"id\": ")).await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_store_write_failure_is_500() {
    let cache = Arc::new(InMemoryCache::new());
    let router = router_over(Arc::new(FailingStore), cache.clone());

    let (status, body) = send(&router, "POST", "/add", Some(&profile_json(&ann()))).await;

    assert_eq!(status, 500);
    assert_eq!(body["code"], "STORE_WRITE_FAILED");
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_cache_write_failure_is_503_but_store_is_written() {
    let store = Arc::new(InMemoryProfileStore::new());
    let router = router_over(store.clone(), Arc::new(FailingCache));

    let (status, body) = send(&router, "POST", "/add", Some(&profile_json(&ann()))).await;

    assert_eq!(status, 503);
    assert_eq!(body["code"], "CACHE_WRITE_FAILED");
    assert_eq!(store.snapshot("u1"), Some(ann()));
}

#[tokio::test]
async fn test_search_survives_cache_outage() {
    let store = Arc::new(InMemoryProfileStore::with_profiles([ann()]));
    let router = router_over(store, Arc::new(FailingCache));

    let (status, body) = send(&router, "GET", "/search/u1", None).await;

    assert_eq!(status, 200);
    assert_eq!(body["name"], "Ann");
}

#[tokio::test]
async fn test_store_read_failure_is_500() {
    let router = router_over(Arc::new(FailingStore), Arc::new(InMemoryCache::new()));

    let (status, body) = send(&router, "GET", "/search/u1", None).await;

    assert_eq!(status, 500);
    assert_eq!(body["code"], "STORE_READ_FAILED");
}

#[tokio::test]
async fn test_evict_missing_entry_reports_false() {
    let app = TestApp::new();

    let (status, body) = send(&app.router, "DELETE", "/cache/nobody", None).await;

    assert_eq!(status, 200);
    assert_eq!(body["evicted"], false);
}

#[tokio::test]
async fn test_evict_with_cache_down_is_503() {
    let router = router_over(Arc::new(InMemoryProfileStore::new()), Arc::new(FailingCache));

    let (status, body) = send(&router, "DELETE", "/cache/u1", None).await;

    assert_eq!(status, 503);
    assert_eq!(body["code"], "CACHE_UNAVAILABLE");
}
