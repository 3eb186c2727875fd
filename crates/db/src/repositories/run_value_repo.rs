//! Repository for the `run_values` table and its aggregate cache.

use sqlx::PgPool;

use relay_core::types::DbId;

use crate::models::flow_run::{RunValue, UpsertRunValue};

/// Column list for run_values queries.
const COLUMNS: &str = "id, org_id, run_id, contact_id, rule_set_id, rule_uuid, category, \
    string_value, decimal_value, datetime_value, media_value";

/// Provides upsert access to recorded run values.
pub struct RunValueRepo;

impl RunValueRepo {
    /// Insert or overwrite the single value a run holds for one rule set,
    /// then drop the rule set's cached category aggregates.
    pub async fn upsert(pool: &PgPool, input: &UpsertRunValue) -> Result<RunValue, sqlx::Error> {
        let query = format!(
            "INSERT INTO run_values
                (org_id, run_id, contact_id, rule_set_id, rule_uuid, category,
                 string_value, decimal_value, datetime_value, media_value)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT ON CONSTRAINT uq_run_values_run_rule_set DO UPDATE SET
                rule_uuid = EXCLUDED.rule_uuid,
                category = EXCLUDED.category,
                string_value = EXCLUDED.string_value,
                decimal_value = EXCLUDED.decimal_value,
                datetime_value = EXCLUDED.datetime_value,
                media_value = EXCLUDED.media_value
             RETURNING {COLUMNS}"
        );
        let value = sqlx::query_as::<_, RunValue>(&query)
            .bind(input.org_id)
            .bind(input.run_id)
            .bind(input.contact_id)
            .bind(input.rule_set_id)
            .bind(input.rule_uuid)
            .bind(&input.category)
            .bind(&input.string_value)
            .bind(input.decimal_value)
            .bind(input.datetime_value)
            .bind(&input.media_value)
            .fetch_one(pool)
            .await?;

        Self::invalidate_summaries(pool, input.rule_set_id).await?;
        Ok(value)
    }

    /// Drop cached category aggregates for a rule set. Reporting rebuilds
    /// them lazily.
    pub async fn invalidate_summaries(pool: &PgPool, rule_set_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM run_value_summaries WHERE rule_set_id = $1")
            .bind(rule_set_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
