//! Repository for the `flow_labels` and `flow_label_links` tables.

use sqlx::PgPool;
use uuid::Uuid;

use relay_core::types::DbId;

use crate::models::flow::FlowLabel;

/// Column list for flow_labels queries.
const COLUMNS: &str = "id, org_id, uuid, name";

/// Provides create/link operations for flow labels.
pub struct FlowLabelRepo;

impl FlowLabelRepo {
    /// Find a flow label by org and UUID.
    pub async fn find_by_uuid(
        pool: &PgPool,
        org_id: DbId,
        uuid: Uuid,
    ) -> Result<Option<FlowLabel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM flow_labels WHERE org_id = $1 AND uuid = $2");
        sqlx::query_as::<_, FlowLabel>(&query)
            .bind(org_id)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// Create a flow label, returning the created row.
    pub async fn create(
        pool: &PgPool,
        org_id: DbId,
        uuid: Uuid,
        name: &str,
    ) -> Result<FlowLabel, sqlx::Error> {
        let query = format!(
            "INSERT INTO flow_labels (org_id, uuid, name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FlowLabel>(&query)
            .bind(org_id)
            .bind(uuid)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Attach a label to a flow; a no-op when the link already exists.
    pub async fn link_flow(pool: &PgPool, flow_id: DbId, label_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO flow_label_links (flow_id, label_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_flow_label_links_pair DO NOTHING",
        )
        .bind(flow_id)
        .bind(label_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
