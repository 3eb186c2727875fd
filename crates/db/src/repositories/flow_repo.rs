//! Repository for the `flows` table.

use sqlx::PgPool;
use uuid::Uuid;

use relay_core::types::DbId;

use crate::models::flow::{CreateFlow, Flow};

/// Column list for flows queries.
const COLUMNS: &str = "id, org_id, uuid, name, flow_type, base_language, version_number, \
    entry_uuid, entry_type, expires_after_minutes, metadata, created_by, created_on";

/// Provides CRUD operations for flows.
pub struct FlowRepo;

impl FlowRepo {
    /// Create a new flow, returning the created row. `entry_type` starts
    /// NULL and is filled in after the flow's nodes are imported.
    pub async fn create(pool: &PgPool, input: &CreateFlow) -> Result<Flow, sqlx::Error> {
        let metadata = input
            .metadata
            .clone()
            .unwrap_or_else(|| serde_json::json!({}));
        let query = format!(
            "INSERT INTO flows
                (org_id, uuid, name, flow_type, base_language, version_number,
                 entry_uuid, expires_after_minutes, metadata, created_by, created_on)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 720), $9, $10,
                 COALESCE($11, now()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Flow>(&query)
            .bind(input.org_id)
            .bind(input.uuid)
            .bind(&input.name)
            .bind(&input.flow_type)
            .bind(&input.base_language)
            .bind(input.version_number)
            .bind(input.entry_uuid)
            .bind(input.expires_after_minutes)
            .bind(&metadata)
            .bind(input.created_by)
            .bind(input.created_on)
            .fetch_one(pool)
            .await
    }

    /// Find a flow by org and UUID.
    pub async fn find_by_uuid(
        pool: &PgPool,
        org_id: DbId,
        uuid: Uuid,
    ) -> Result<Option<Flow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM flows WHERE org_id = $1 AND uuid = $2");
        sqlx::query_as::<_, Flow>(&query)
            .bind(org_id)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// Find a flow by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Flow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM flows WHERE id = $1");
        sqlx::query_as::<_, Flow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set the entry node classification (`R` or `A`) once the flow's
    /// nodes are known.
    pub async fn set_entry_type(
        pool: &PgPool,
        id: DbId,
        entry_type: &str,
    ) -> Result<Option<Flow>, sqlx::Error> {
        let query = format!(
            "UPDATE flows SET entry_type = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Flow>(&query)
            .bind(id)
            .bind(entry_type)
            .fetch_optional(pool)
            .await
    }
}
