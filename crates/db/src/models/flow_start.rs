use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use relay_core::types::{DbId, Timestamp};

/// A row from the `flow_starts` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FlowStart {
    pub id: DbId,
    pub org_id: DbId,
    pub uuid: Uuid,
    pub flow_id: DbId,
    pub status: String,
    pub restart_participants: bool,
    /// Count of contacts addressed at the source, not of resolved locals.
    pub contact_count: i32,
    pub extra: Option<serde_json::Value>,
    pub created_by: Option<DbId>,
    pub created_on: Timestamp,
}

/// DTO for creating a flow start.
#[derive(Debug, Deserialize)]
pub struct CreateFlowStart {
    pub org_id: DbId,
    pub uuid: Uuid,
    pub flow_id: DbId,
    pub status: String,
    pub restart_participants: bool,
    pub contact_count: i32,
    pub extra: Option<serde_json::Value>,
    pub created_by: Option<DbId>,
    pub created_on: Option<Timestamp>,
}
