//! Repository for the `migration_associations` ledger table.

use sqlx::PgPool;

use relay_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use relay_core::types::DbId;

use crate::models::migration::MigrationAssociation;

/// Column list for migration_associations queries.
const COLUMNS: &str = "id, migration_id, reference, source_value, destination_value, created_on";

/// Ledger access: exact lookups and insert-only records. Rows are never
/// updated or deleted; the unique constraint on
/// `(migration_id, reference, source_value)` is the idempotence guarantee.
pub struct MigrationAssociationRepo;

impl MigrationAssociationRepo {
    /// Look up the destination identifier recorded for a source identifier,
    /// if any. Exact match only.
    pub async fn lookup(
        pool: &PgPool,
        migration_id: DbId,
        reference: &str,
        source_value: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT destination_value FROM migration_associations
             WHERE migration_id = $1 AND reference = $2 AND source_value = $3",
        )
        .bind(migration_id)
        .bind(reference)
        .bind(source_value)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(destination,)| destination))
    }

    /// Record a source-to-destination mapping, returning the created row.
    pub async fn record(
        pool: &PgPool,
        migration_id: DbId,
        reference: &str,
        source_value: &str,
        destination_value: &str,
    ) -> Result<MigrationAssociation, sqlx::Error> {
        let query = format!(
            "INSERT INTO migration_associations
                (migration_id, reference, source_value, destination_value)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MigrationAssociation>(&query)
            .bind(migration_id)
            .bind(reference)
            .bind(source_value)
            .bind(destination_value)
            .fetch_one(pool)
            .await
    }

    /// List ledger entries for a migration, optionally filtered by
    /// reference kind.
    pub async fn list_by_migration(
        pool: &PgPool,
        migration_id: DbId,
        reference: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<MigrationAssociation>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {COLUMNS} FROM migration_associations
             WHERE migration_id = $1 AND ($2::varchar IS NULL OR reference = $2)
             ORDER BY id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, MigrationAssociation>(&query)
            .bind(migration_id)
            .bind(reference)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
