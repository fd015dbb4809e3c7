//! # Strata Repository
//!
//! The durable tier of the profile service.
//!
//! ```text
//! ProfileService
//!   ↓  Arc<dyn ProfileStore>     (store interface)
//! DynamoProfileStore             (point reads and writes keyed by id)
//!   ↓  DynamoSession             (SDK client, region, retry policy)
//! DynamoDB
//! ```
//!
//! [`InMemoryProfileStore`] implements the same interface for tests and for
//! running without AWS.

pub mod dynamo;
pub mod memory;
pub mod traits;

pub use dynamo::*;
pub use memory::InMemoryProfileStore;
pub use traits::*;

use std::sync::Arc;
use strata_config::{StoreBackend, StoreConfig};
use strata_core::StrataResult;
use tracing::info;

/// Builds the configured store.
///
/// Establishes the DynamoDB session when the remote backend is selected. The
/// table is not touched until [`ProfileStore::ensure_schema`] is called.
pub async fn create_store(config: &StoreConfig) -> StrataResult<Arc<dyn ProfileStore>> {
    match config.backend {
        StoreBackend::Dynamo => {
            let session = DynamoSession::connect(config).await?;
            Ok(Arc::new(DynamoProfileStore::new(session, config)))
        }
        StoreBackend::Memory => {
            info!("Using in-memory profile store");
            Ok(Arc::new(InMemoryProfileStore::new()))
        }
    }
}
