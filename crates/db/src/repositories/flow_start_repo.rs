//! Repository for the `flow_starts` table and its recipient link tables.

use sqlx::PgPool;

use relay_core::types::DbId;

use crate::models::flow_start::{CreateFlowStart, FlowStart};

/// Column list for flow_starts queries.
const COLUMNS: &str = "id, org_id, uuid, flow_id, status, restart_participants, contact_count, \
    extra, created_by, created_on";

/// Provides CRUD operations for flow starts.
pub struct FlowStartRepo;

impl FlowStartRepo {
    /// Create a flow start, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFlowStart) -> Result<FlowStart, sqlx::Error> {
        let query = format!(
            "INSERT INTO flow_starts
                (org_id, uuid, flow_id, status, restart_participants, contact_count,
                 extra, created_by, created_on)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, now()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FlowStart>(&query)
            .bind(input.org_id)
            .bind(input.uuid)
            .bind(input.flow_id)
            .bind(&input.status)
            .bind(input.restart_participants)
            .bind(input.contact_count)
            .bind(&input.extra)
            .bind(input.created_by)
            .bind(input.created_on)
            .fetch_one(pool)
            .await
    }

    /// Attach a contact recipient; a no-op when already attached.
    pub async fn attach_contact(
        pool: &PgPool,
        start_id: DbId,
        contact_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO flow_start_contacts (start_id, contact_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_flow_start_contacts_pair DO NOTHING",
        )
        .bind(start_id)
        .bind(contact_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Attach a group recipient; a no-op when already attached.
    pub async fn attach_group(
        pool: &PgPool,
        start_id: DbId,
        group_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO flow_start_groups (start_id, group_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_flow_start_groups_pair DO NOTHING",
        )
        .bind(start_id)
        .bind(group_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
