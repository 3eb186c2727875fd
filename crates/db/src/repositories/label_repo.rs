//! Repository for the `labels` and `msg_labels` tables.

use sqlx::PgPool;
use uuid::Uuid;

use relay_core::types::DbId;

use crate::models::msg::Label;

/// Column list for labels queries.
const COLUMNS: &str = "id, org_id, uuid, name";

/// Provides create/link operations for message labels.
pub struct LabelRepo;

impl LabelRepo {
    /// Find a label by org and UUID.
    pub async fn find_by_uuid(
        pool: &PgPool,
        org_id: DbId,
        uuid: Uuid,
    ) -> Result<Option<Label>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM labels WHERE org_id = $1 AND uuid = $2");
        sqlx::query_as::<_, Label>(&query)
            .bind(org_id)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// Create a label, returning the created row.
    pub async fn create(
        pool: &PgPool,
        org_id: DbId,
        uuid: Uuid,
        name: &str,
    ) -> Result<Label, sqlx::Error> {
        let query = format!(
            "INSERT INTO labels (org_id, uuid, name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Label>(&query)
            .bind(org_id)
            .bind(uuid)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Attach a label to a message; a no-op when the link already exists.
    pub async fn link_msg(pool: &PgPool, msg_id: DbId, label_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO msg_labels (msg_id, label_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_msg_labels_pair DO NOTHING",
        )
        .bind(msg_id)
        .bind(label_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
