//! DynamoDB profile store.

use super::item::{item_to_profile, profile_to_item, ATTR_ID};
use super::session::DynamoSession;
use crate::traits::ProfileStore;
use async_trait::async_trait;
use aws_sdk_dynamodb::client::Waiters;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
    ScalarAttributeType,
};
use std::time::Duration;
use strata_config::StoreConfig;
use strata_core::{Profile, StrataError, StrataResult};
use tracing::{debug, info, instrument, warn};

/// DynamoDB profile store.
///
/// One item per profile, keyed by the `id` attribute alone.
#[derive(Clone, Debug)]
pub struct DynamoProfileStore {
    session: DynamoSession,
    table_name: String,
    read_capacity: i64,
    write_capacity: i64,
    table_ready_timeout: Duration,
}

impl DynamoProfileStore {
    /// Creates a new store over an established session.
    #[must_use]
    pub fn new(session: DynamoSession, config: &StoreConfig) -> Self {
        Self {
            session,
            table_name: config.table_name.clone(),
            read_capacity: config.read_capacity,
            write_capacity: config.write_capacity,
            table_ready_timeout: config.table_ready_timeout(),
        }
    }

    /// Blocks until the table is ACTIVE.
    ///
    /// `CreateTable` returns while the table is still `CREATING`, and a table
    /// created by another replica may be in the same state.
    async fn wait_until_active(&self) -> StrataResult<()> {
        self.session
            .client()
            .wait_until_table_exists()
            .table_name(&self.table_name)
            .wait(self.table_ready_timeout)
            .await
            .map_err(|e| {
                warn!("Profile table did not become active: {}", DisplayErrorContext(&e));
                StrataError::StoreUnavailable(format!(
                    "Table {} not active after {:?}: {}",
                    self.table_name,
                    self.table_ready_timeout,
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!("Profile table is active");
        Ok(())
    }

    fn table_definition(
        &self,
    ) -> StrataResult<(AttributeDefinition, KeySchemaElement, ProvisionedThroughput)> {
        let attribute = AttributeDefinition::builder()
            .attribute_name(ATTR_ID)
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(|e| StrataError::StoreUnavailable(e.to_string()))?;
        let key = KeySchemaElement::builder()
            .attribute_name(ATTR_ID)
            .key_type(KeyType::Hash)
            .build()
            .map_err(|e| StrataError::StoreUnavailable(e.to_string()))?;
        let throughput = ProvisionedThroughput::builder()
            .read_capacity_units(self.read_capacity)
            .write_capacity_units(self.write_capacity)
            .build()
            .map_err(|e| StrataError::StoreUnavailable(e.to_string()))?;
        Ok((attribute, key, throughput))
    }
}

#[async_trait]
impl ProfileStore for DynamoProfileStore {
    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn ensure_schema(&self) -> StrataResult<()> {
        let (attribute, key, throughput) = self.table_definition()?;

        match self
            .session
            .client()
            .create_table()
            .table_name(&self.table_name)
            .attribute_definitions(attribute)
            .key_schema(key)
            .provisioned_throughput(throughput)
            .send()
            .await
        {
            Ok(_) => {
                info!(
                    read_capacity = self.read_capacity,
                    write_capacity = self.write_capacity,
                    "Created profile table"
                );
                self.wait_until_active().await
            }
            Err(err) => {
                if err
                    .as_service_error()
                    .map_or(false, |e| e.is_resource_in_use_exception())
                {
                    debug!("Profile table already exists");
                    self.wait_until_active().await
                } else {
                    warn!("Failed to create profile table: {}", DisplayErrorContext(&err));
                    Err(StrataError::StoreUnavailable(format!(
                        "CreateTable {}: {}",
                        self.table_name,
                        DisplayErrorContext(&err)
                    )))
                }
            }
        }
    }

    #[instrument(skip(self, profile), fields(id = %profile.id))]
    async fn put(&self, profile: &Profile) -> StrataResult<()> {
        self.session
            .client()
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(profile_to_item(profile)))
            .send()
            .await
            .map_err(|e| StrataError::StoreWriteFailed(DisplayErrorContext(&e).to_string()))?;

        debug!("Stored profile");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> StrataResult<Option<Profile>> {
        let output = self
            .session
            .client()
            .get_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, AttributeValue::S(id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| StrataError::StoreReadFailed(DisplayErrorContext(&e).to_string()))?;

        match output.item() {
            Some(item) => {
                debug!("Store hit");
                item_to_profile(item).map(Some)
            }
            None => {
                debug!("Store miss");
                Ok(None)
            }
        }
    }

    async fn health_check(&self) -> StrataResult<()> {
        self.session
            .client()
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| {
                StrataError::StoreUnavailable(format!(
                    "Health check failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}
