//! Shared state for one migration run.

use uuid::Uuid;

use relay_core::reference::Reference;
use relay_core::types::DbId;
use relay_db::models::channel::Channel;
use relay_db::models::migration::Migration;
use relay_db::repositories::{ChannelRepo, MigrationAssociationRepo};
use relay_db::DbPool;
use relay_remote::RemoteClient;

use crate::error::EngineError;

/// Everything an importer needs: the pool, the remote client built from the
/// migration's credentials, and ledger access scoped to the migration.
pub struct ImportContext {
    pool: DbPool,
    client: RemoteClient,
    migration: Migration,
}

impl ImportContext {
    pub fn new(pool: DbPool, migration: Migration) -> Self {
        let client = RemoteClient::new(migration.api_host.clone(), migration.api_token.clone());
        Self {
            pool,
            client,
            migration,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn client(&self) -> &RemoteClient {
        &self.client
    }

    pub fn migration_id(&self) -> DbId {
        self.migration.id
    }

    pub fn org_id(&self) -> DbId {
        self.migration.org_id
    }

    pub fn initiated_by(&self) -> Option<DbId> {
        self.migration.initiated_by
    }

    /// Look up the destination value the ledger holds for a source value.
    pub async fn lookup(
        &self,
        reference: Reference,
        source_value: &str,
    ) -> Result<Option<String>, EngineError> {
        let destination = MigrationAssociationRepo::lookup(
            &self.pool,
            self.migration.id,
            reference.as_str(),
            source_value,
        )
        .await?;
        Ok(destination)
    }

    /// Look up a ledger entry whose destination is a local row ID.
    pub async fn lookup_id(
        &self,
        reference: Reference,
        source_value: &str,
    ) -> Result<Option<DbId>, EngineError> {
        Ok(self
            .lookup(reference, source_value)
            .await?
            .and_then(|destination| destination.parse::<DbId>().ok()))
    }

    /// Record a source-to-destination mapping in the ledger.
    pub async fn record(
        &self,
        reference: Reference,
        source_value: &str,
        destination_value: &str,
    ) -> Result<(), EngineError> {
        MigrationAssociationRepo::record(
            &self.pool,
            self.migration.id,
            reference.as_str(),
            source_value,
            destination_value,
        )
        .await?;
        Ok(())
    }

    /// Record a mapping whose destination is a local row ID.
    pub async fn record_id(
        &self,
        reference: Reference,
        source_value: &str,
        destination_id: DbId,
    ) -> Result<(), EngineError> {
        self.record(reference, source_value, &destination_id.to_string())
            .await
    }

    /// Resolve a source channel UUID to a local channel through the
    /// migration's channel map. `None` when the map has no entry or the
    /// mapped channel does not exist in this org.
    pub async fn resolve_channel(
        &self,
        source_uuid: &str,
    ) -> Result<Option<Channel>, EngineError> {
        let Some(local_uuid) = self
            .migration
            .channels
            .get(source_uuid)
            .and_then(|v| v.as_str())
            .and_then(|s| Uuid::parse_str(s).ok())
        else {
            return Ok(None);
        };

        let channel = ChannelRepo::find_by_uuid(&self.pool, self.migration.org_id, local_uuid)
            .await?;
        Ok(channel)
    }
}
