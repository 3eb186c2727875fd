//! Repository for the `broadcasts` table and its recipient link tables.

use sqlx::PgPool;

use relay_core::types::DbId;

use crate::models::broadcast::{Broadcast, CreateBroadcast};

/// Column list for broadcasts queries.
const COLUMNS: &str = "id, org_id, text, status, recipient_count, created_by, created_on";

/// Provides CRUD operations for broadcasts.
pub struct BroadcastRepo;

impl BroadcastRepo {
    /// Create a broadcast, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBroadcast) -> Result<Broadcast, sqlx::Error> {
        let query = format!(
            "INSERT INTO broadcasts (org_id, text, status, recipient_count, created_by, created_on)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, now()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Broadcast>(&query)
            .bind(input.org_id)
            .bind(&input.text)
            .bind(&input.status)
            .bind(input.recipient_count)
            .bind(input.created_by)
            .bind(input.created_on)
            .fetch_one(pool)
            .await
    }

    /// Attach a contact target; a no-op when already attached.
    pub async fn attach_contact(
        pool: &PgPool,
        broadcast_id: DbId,
        contact_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO broadcast_contacts (broadcast_id, contact_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_broadcast_contacts_pair DO NOTHING",
        )
        .bind(broadcast_id)
        .bind(contact_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Attach a group target; a no-op when already attached.
    pub async fn attach_group(
        pool: &PgPool,
        broadcast_id: DbId,
        group_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO broadcast_groups (broadcast_id, group_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_broadcast_groups_pair DO NOTHING",
        )
        .bind(broadcast_id)
        .bind(group_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Attach a URN target; a no-op when already attached.
    pub async fn attach_urn(
        pool: &PgPool,
        broadcast_id: DbId,
        urn_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO broadcast_urns (broadcast_id, urn_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_broadcast_urns_pair DO NOTHING",
        )
        .bind(broadcast_id)
        .bind(urn_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Record a resolved contact as a delivery recipient; a no-op on repeat.
    pub async fn add_recipient(
        pool: &PgPool,
        broadcast_id: DbId,
        contact_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO broadcast_recipients (broadcast_id, contact_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_broadcast_recipients_pair DO NOTHING",
        )
        .bind(broadcast_id)
        .bind(contact_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
