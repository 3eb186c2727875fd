//! Repository for the `flow_runs` table.

use sqlx::PgPool;

use crate::models::flow_run::{CreateFlowRun, FlowRun};

/// Column list for flow_runs queries.
const COLUMNS: &str = "id, org_id, flow_id, contact_id, start_id, responded, exit_type, \
    created_on, modified_on, exited_on, expires_on";

/// Provides CRUD operations for flow runs.
pub struct FlowRunRepo;

impl FlowRunRepo {
    /// Create a flow run, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFlowRun) -> Result<FlowRun, sqlx::Error> {
        let query = format!(
            "INSERT INTO flow_runs
                (org_id, flow_id, contact_id, start_id, responded, exit_type,
                 created_on, modified_on, exited_on, expires_on)
             VALUES ($1, $2, $3, $4, $5, $6,
                 COALESCE($7, now()), COALESCE($8, now()), $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FlowRun>(&query)
            .bind(input.org_id)
            .bind(input.flow_id)
            .bind(input.contact_id)
            .bind(input.start_id)
            .bind(input.responded)
            .bind(&input.exit_type)
            .bind(input.created_on)
            .bind(input.modified_on)
            .bind(input.exited_on)
            .bind(input.expires_on)
            .fetch_one(pool)
            .await
    }
}
