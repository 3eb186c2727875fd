//! Repository for the `flow_steps` table.

use sqlx::PgPool;
use uuid::Uuid;

use relay_core::types::{DbId, Timestamp};

use crate::models::flow_run::FlowStep;

/// Column list for flow_steps queries.
const COLUMNS: &str = "id, run_id, node_uuid, step_type, next_uuid, arrived_on";

/// Provides append access to run path steps.
pub struct FlowStepRepo;

impl FlowStepRepo {
    /// Record one visited node in a run's path, with the destination node
    /// the run moved on to, when known.
    pub async fn record(
        pool: &PgPool,
        run_id: DbId,
        node_uuid: Uuid,
        step_type: &str,
        next_uuid: Option<Uuid>,
        arrived_on: Timestamp,
    ) -> Result<FlowStep, sqlx::Error> {
        let query = format!(
            "INSERT INTO flow_steps (run_id, node_uuid, step_type, next_uuid, arrived_on)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FlowStep>(&query)
            .bind(run_id)
            .bind(node_uuid)
            .bind(step_type)
            .bind(next_uuid)
            .bind(arrived_on)
            .fetch_one(pool)
            .await
    }
}
