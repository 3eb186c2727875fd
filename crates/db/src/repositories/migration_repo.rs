//! Repository for the `migrations` table.

use sqlx::PgPool;

use relay_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use relay_core::types::DbId;

use crate::models::migration::{CreateMigration, Migration};

/// Column list for migrations queries.
const COLUMNS: &str = "id, org_id, initiated_by, api_host, api_token, channels, created_on";

/// Provides CRUD operations for migration runs.
pub struct MigrationRepo;

impl MigrationRepo {
    /// Create a migration run, returning the created row. Credentials must
    /// already be normalized and probed.
    pub async fn create(pool: &PgPool, input: &CreateMigration) -> Result<Migration, sqlx::Error> {
        let query = format!(
            "INSERT INTO migrations (org_id, initiated_by, api_host, api_token, channels)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Migration>(&query)
            .bind(input.org_id)
            .bind(input.initiated_by)
            .bind(&input.api_host)
            .bind(&input.api_token)
            .bind(&input.channels)
            .fetch_one(pool)
            .await
    }

    /// Find a migration run by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Migration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM migrations WHERE id = $1");
        sqlx::query_as::<_, Migration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List migration runs for an org, newest first.
    pub async fn list_by_org(
        pool: &PgPool,
        org_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Migration>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {COLUMNS} FROM migrations
             WHERE org_id = $1
             ORDER BY created_on DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Migration>(&query)
            .bind(org_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
