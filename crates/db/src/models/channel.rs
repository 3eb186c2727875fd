use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use relay_core::types::{DbId, Timestamp};

/// A row from the `channels` table. Channels are tenant fixtures; imports
/// only resolve them, never create them.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Channel {
    pub id: DbId,
    pub org_id: DbId,
    pub uuid: Uuid,
    pub name: String,
    pub created_on: Timestamp,
}
