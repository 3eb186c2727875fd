//! Repository for the `rule_sets` table.

use sqlx::PgPool;

use relay_core::types::DbId;

use crate::models::flow::{CreateRuleSet, RuleSet};

/// Column list for rule_sets queries.
const COLUMNS: &str = "id, flow_id, uuid, label, operand, finished_key, ruleset_type, \
    response_type, x, y, rules, config";

/// Provides CRUD operations for flow rule-set nodes.
pub struct RuleSetRepo;

impl RuleSetRepo {
    /// Create or refresh a rule set node, keyed by (flow, uuid). Re-imported
    /// definitions overwrite the node in place instead of conflicting.
    pub async fn upsert(pool: &PgPool, input: &CreateRuleSet) -> Result<RuleSet, sqlx::Error> {
        let query = format!(
            "INSERT INTO rule_sets
                (flow_id, uuid, label, operand, finished_key, ruleset_type,
                 response_type, x, y, rules, config)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             ON CONFLICT ON CONSTRAINT uq_rule_sets_flow_uuid DO UPDATE SET
                label = EXCLUDED.label,
                operand = EXCLUDED.operand,
                finished_key = EXCLUDED.finished_key,
                ruleset_type = EXCLUDED.ruleset_type,
                response_type = EXCLUDED.response_type,
                x = EXCLUDED.x,
                y = EXCLUDED.y,
                rules = EXCLUDED.rules,
                config = EXCLUDED.config
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RuleSet>(&query)
            .bind(input.flow_id)
            .bind(input.uuid)
            .bind(&input.label)
            .bind(&input.operand)
            .bind(&input.finished_key)
            .bind(&input.ruleset_type)
            .bind(&input.response_type)
            .bind(input.x)
            .bind(input.y)
            .bind(&input.rules)
            .bind(&input.config)
            .fetch_one(pool)
            .await
    }

    /// List all rule set nodes of a flow.
    pub async fn list_by_flow(pool: &PgPool, flow_id: DbId) -> Result<Vec<RuleSet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rule_sets WHERE flow_id = $1 ORDER BY id");
        sqlx::query_as::<_, RuleSet>(&query)
            .bind(flow_id)
            .fetch_all(pool)
            .await
    }
}
