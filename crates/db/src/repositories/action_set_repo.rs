//! Repository for the `action_sets` table.

use sqlx::PgPool;

use relay_core::types::DbId;

use crate::models::flow::{ActionSet, CreateActionSet};

/// Column list for action_sets queries.
const COLUMNS: &str = "id, flow_id, uuid, destination_uuid, x, y, actions";

/// Provides CRUD operations for flow action-set nodes.
pub struct ActionSetRepo;

impl ActionSetRepo {
    /// Create or refresh an action set node, keyed by (flow, uuid).
    /// Re-imported definitions overwrite the node in place instead of
    /// conflicting.
    pub async fn upsert(pool: &PgPool, input: &CreateActionSet) -> Result<ActionSet, sqlx::Error> {
        let query = format!(
            "INSERT INTO action_sets (flow_id, uuid, destination_uuid, x, y, actions)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT ON CONSTRAINT uq_action_sets_flow_uuid DO UPDATE SET
                destination_uuid = EXCLUDED.destination_uuid,
                x = EXCLUDED.x,
                y = EXCLUDED.y,
                actions = EXCLUDED.actions
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActionSet>(&query)
            .bind(input.flow_id)
            .bind(input.uuid)
            .bind(input.destination_uuid)
            .bind(input.x)
            .bind(input.y)
            .bind(&input.actions)
            .fetch_one(pool)
            .await
    }

    /// List all action set nodes of a flow.
    pub async fn list_by_flow(pool: &PgPool, flow_id: DbId) -> Result<Vec<ActionSet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM action_sets WHERE flow_id = $1 ORDER BY id");
        sqlx::query_as::<_, ActionSet>(&query)
            .bind(flow_id)
            .fetch_all(pool)
            .await
    }
}
