//! Repository for the `campaigns` table.

use sqlx::PgPool;
use uuid::Uuid;

use relay_core::types::DbId;

use crate::models::campaign::Campaign;

/// Column list for campaigns queries.
const COLUMNS: &str = "id, org_id, uuid, name, group_id, created_by, created_on";

/// Provides CRUD operations for campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Create a campaign, returning the created row.
    pub async fn create(
        pool: &PgPool,
        org_id: DbId,
        uuid: Uuid,
        name: &str,
        group_id: DbId,
        created_by: Option<DbId>,
    ) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns (org_id, uuid, name, group_id, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(org_id)
            .bind(uuid)
            .bind(name)
            .bind(group_id)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign by org and UUID.
    pub async fn find_by_uuid(
        pool: &PgPool,
        org_id: DbId,
        uuid: Uuid,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE org_id = $1 AND uuid = $2");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(org_id)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }
}
