//! Store contract tests.
//!
//! Always run against the in-memory store. Set `STRATA_TEST_DYNAMO_ENDPOINT`
//! (e.g. `http://localhost:8000` for DynamoDB Local) to also run them against
//! a real DynamoDB endpoint.

use std::sync::Arc;
use strata_config::{StoreBackend, StoreConfig};
use strata_core::{Profile, StrataError};
use strata_repository::{create_store, InMemoryProfileStore, ProfileStore};

async fn stores() -> Vec<Arc<dyn ProfileStore>> {
    let mut stores: Vec<Arc<dyn ProfileStore>> = vec![Arc::new(InMemoryProfileStore::new())];

    if let Ok(endpoint) = std::env::var("STRATA_TEST_DYNAMO_ENDPOINT") {
        let config = StoreConfig {
            backend: StoreBackend::Dynamo,
            endpoint,
            table_name: format!("ProfilesTest{}", std::process::id()),
            ..StoreConfig::default()
        };
        let store = create_store(&config).await.expect("Failed to create DynamoDB store");
        store.ensure_schema().await.expect("Failed to create table");
        stores.push(store);
    }

    stores
}

#[tokio::test]
async fn test_write_then_read_returns_equal_record() {
    for store in stores().await {
        let profile = Profile::new("contract-u1", "Ann", "ann@x.com", 30);
        store.put(&profile).await.unwrap();
        assert_eq!(store.get("contract-u1").await.unwrap(), Some(profile));
    }
}

#[tokio::test]
async fn test_never_written_id_is_none() {
    for store in stores().await {
        assert_eq!(store.get("contract-does-not-exist").await.unwrap(), None);
    }
}

#[tokio::test]
async fn test_rewrite_is_idempotent() {
    for store in stores().await {
        let profile = Profile::new("contract-u2", "Bo", "bo@x.com", 41);
        store.put(&profile).await.unwrap();
        store.put(&profile).await.unwrap();
        assert_eq!(store.get("contract-u2").await.unwrap(), Some(profile));
    }
}

#[tokio::test]
async fn test_ensure_schema_twice_succeeds() {
    for store in stores().await {
        store.ensure_schema().await.unwrap();
        store.ensure_schema().await.unwrap();
    }
}

#[tokio::test]
async fn test_concurrent_writes_last_writer_wins() {
    for store in stores().await {
        let a = Profile::new("contract-race", "A", "a@x.com", 1);
        let b = Profile::new("contract-race", "B", "b@x.com", 2);

        let (ra, rb) = futures::join!(store.put(&a), store.put(&b));
        ra.unwrap();
        rb.unwrap();

        let stored = store.get("contract-race").await.unwrap().unwrap();
        assert!(stored == a || stored == b);
    }
}

#[tokio::test]
async fn test_fresh_table_accepts_writes_right_after_schema() {
    let Ok(endpoint) = std::env::var("STRATA_TEST_DYNAMO_ENDPOINT") else {
        return;
    };
    let config = StoreConfig {
        backend: StoreBackend::Dynamo,
        endpoint,
        table_name: format!("ProfilesFresh{}", std::process::id()),
        ..StoreConfig::default()
    };

    let store = create_store(&config).await.unwrap();
    store.ensure_schema().await.unwrap();

    let profile = Profile::new("fresh-u1", "Cy", "cy@x.com", 22);
    store.put(&profile).await.unwrap();
    assert_eq!(store.get("fresh-u1").await.unwrap(), Some(profile));
    store.health_check().await.unwrap();
}

#[tokio::test]
async fn test_unreachable_endpoint_fails_schema_with_store_unavailable() {
    let config = StoreConfig {
        backend: StoreBackend::Dynamo,
        endpoint: "http://127.0.0.1:9".to_string(),
        max_attempts: 1,
        ..StoreConfig::default()
    };
    std::env::set_var("AWS_ACCESS_KEY_ID", "test");
    std::env::set_var("AWS_SECRET_ACCESS_KEY", "test");

    let store = create_store(&config).await.unwrap();
    match store.ensure_schema().await {
        Err(StrataError::StoreUnavailable(_)) => {}
        other => panic!("Expected StoreUnavailable, got {:?}", other),
    }
}
