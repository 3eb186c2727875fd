use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use relay_core::types::{DbId, Timestamp};

/// A row from the `campaigns` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Campaign {
    pub id: DbId,
    pub org_id: DbId,
    pub uuid: Uuid,
    pub name: String,
    pub group_id: DbId,
    pub created_by: Option<DbId>,
    pub created_on: Timestamp,
}

/// A row from the `campaign_events` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CampaignEvent {
    pub id: DbId,
    pub campaign_id: DbId,
    pub uuid: Uuid,
    /// `F` for flow events, `M` for single-message events.
    pub event_type: String,
    pub offset_value: i32,
    pub unit: String,
    pub delivery_hour: i32,
    pub relative_to_key: Option<String>,
    pub message: Option<String>,
    pub flow_id: Option<DbId>,
    pub created_on: Timestamp,
}

/// DTO for creating a campaign event.
#[derive(Debug, Deserialize)]
pub struct CreateCampaignEvent {
    pub campaign_id: DbId,
    pub uuid: Uuid,
    pub event_type: String,
    pub offset_value: i32,
    pub unit: String,
    pub delivery_hour: i32,
    pub relative_to_key: Option<String>,
    pub message: Option<String>,
    pub flow_id: Option<DbId>,
    pub created_on: Option<Timestamp>,
}
