use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use relay_core::types::{DbId, Timestamp};

/// A row from the `migrations` table: one import run against one remote
/// instance. Credentials are normalized and probed before the row is
/// created and are immutable afterwards.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Migration {
    pub id: DbId,
    pub org_id: DbId,
    pub initiated_by: Option<DbId>,
    pub api_host: String,
    /// Full `Authorization` header value, `Token <value>`.
    #[serde(skip_serializing)]
    pub api_token: String,
    /// Source-channel-UUID to local-channel-UUID map.
    pub channels: serde_json::Value,
    pub created_on: Timestamp,
}

/// DTO for creating a migration run.
#[derive(Debug, Deserialize)]
pub struct CreateMigration {
    pub org_id: DbId,
    pub initiated_by: Option<DbId>,
    pub api_host: String,
    pub api_token: String,
    pub channels: serde_json::Value,
}

/// A row from the `migration_associations` table: one ledger entry mapping
/// a source identifier to its destination identifier.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MigrationAssociation {
    pub id: DbId,
    pub migration_id: DbId,
    pub reference: String,
    pub source_value: String,
    pub destination_value: String,
    pub created_on: Timestamp,
}
