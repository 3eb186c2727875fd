use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use relay_core::types::{DbId, Timestamp};

/// A row from the `msgs` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Msg {
    pub id: DbId,
    pub org_id: DbId,
    pub broadcast_id: Option<DbId>,
    pub contact_id: DbId,
    pub contact_urn_id: DbId,
    pub channel_id: DbId,
    /// `I` incoming, `O` outgoing.
    pub direction: String,
    pub msg_type: Option<String>,
    pub status: String,
    pub visibility: String,
    pub text: String,
    /// Attachment list; imported media arrives as a single-element array.
    pub attachments: Option<serde_json::Value>,
    pub created_on: Timestamp,
    pub modified_on: Timestamp,
    pub sent_on: Option<Timestamp>,
}

/// DTO for creating a message.
#[derive(Debug, Deserialize)]
pub struct CreateMsg {
    pub org_id: DbId,
    pub broadcast_id: Option<DbId>,
    pub contact_id: DbId,
    pub contact_urn_id: DbId,
    pub channel_id: DbId,
    pub direction: String,
    pub msg_type: Option<String>,
    pub status: String,
    pub visibility: String,
    pub text: String,
    pub attachments: Option<serde_json::Value>,
    pub created_on: Option<Timestamp>,
    pub modified_on: Option<Timestamp>,
    pub sent_on: Option<Timestamp>,
}

/// A row from the `labels` table (message labels).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Label {
    pub id: DbId,
    pub org_id: DbId,
    pub uuid: Uuid,
    pub name: String,
}
