//! Repository for the `campaign_events` table.

use sqlx::PgPool;
use uuid::Uuid;

use relay_core::types::DbId;

use crate::models::campaign::{CampaignEvent, CreateCampaignEvent};

/// Column list for campaign_events queries.
const COLUMNS: &str = "id, campaign_id, uuid, event_type, offset_value, unit, \
    delivery_hour, relative_to_key, message, flow_id, created_on";

/// Provides CRUD operations for campaign events.
pub struct CampaignEventRepo;

impl CampaignEventRepo {
    /// Create a campaign event, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCampaignEvent,
    ) -> Result<CampaignEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_events
                (campaign_id, uuid, event_type, offset_value, unit, delivery_hour,
                 relative_to_key, message, flow_id, created_on)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, now()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignEvent>(&query)
            .bind(input.campaign_id)
            .bind(input.uuid)
            .bind(&input.event_type)
            .bind(input.offset_value)
            .bind(&input.unit)
            .bind(input.delivery_hour)
            .bind(&input.relative_to_key)
            .bind(&input.message)
            .bind(input.flow_id)
            .bind(input.created_on)
            .fetch_one(pool)
            .await
    }

    /// Find an event by campaign and UUID.
    pub async fn find_by_uuid(
        pool: &PgPool,
        campaign_id: DbId,
        uuid: Uuid,
    ) -> Result<Option<CampaignEvent>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM campaign_events WHERE campaign_id = $1 AND uuid = $2");
        sqlx::query_as::<_, CampaignEvent>(&query)
            .bind(campaign_id)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }
}
