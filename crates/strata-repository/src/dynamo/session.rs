//! DynamoDB session management.

use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;
use strata_config::StoreConfig;
use strata_core::{StrataError, StrataResult};
use tracing::info;

/// Shared DynamoDB client plus the settings it was built with.
///
/// Built once at startup and shared by every request. Retries happen only
/// inside the SDK, using the standard strategy with exponential backoff.
#[derive(Clone)]
pub struct DynamoSession {
    client: Client,
    region: String,
}

impl DynamoSession {
    /// Establishes a session from configuration.
    pub async fn connect(config: &StoreConfig) -> StrataResult<Self> {
        if config.region.is_empty() {
            return Err(StrataError::StoreUnavailable(
                "store.region is required".to_string(),
            ));
        }

        let retry = RetryConfig::standard()
            .with_max_attempts(config.max_attempts)
            .with_max_backoff(config.max_backoff());

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .retry_config(retry);

        if let Some(endpoint) = config.endpoint_url() {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let client = Client::new(&sdk_config);

        info!(
            region = %config.region,
            endpoint = config.endpoint_url().unwrap_or("default"),
            max_attempts = config.max_attempts,
            "DynamoDB client initialised"
        );

        Ok(Self {
            client,
            region: config.region.clone(),
        })
    }

    /// Returns the SDK client.
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl std::fmt::Debug for DynamoSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoSession")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}
