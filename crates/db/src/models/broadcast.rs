use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use relay_core::types::{DbId, Timestamp};

/// A row from the `broadcasts` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Broadcast {
    pub id: DbId,
    pub org_id: DbId,
    pub text: String,
    /// `S` sent: imported broadcasts are historical, already-delivered sends.
    pub status: String,
    pub recipient_count: i32,
    pub created_by: Option<DbId>,
    pub created_on: Timestamp,
}

/// DTO for creating a broadcast.
#[derive(Debug, Deserialize)]
pub struct CreateBroadcast {
    pub org_id: DbId,
    pub text: String,
    pub status: String,
    pub recipient_count: i32,
    pub created_by: Option<DbId>,
    pub created_on: Option<Timestamp>,
}
