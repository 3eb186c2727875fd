use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use relay_core::types::{DbId, Timestamp};

/// A row from the `contact_groups` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContactGroup {
    pub id: DbId,
    pub org_id: DbId,
    pub uuid: Uuid,
    pub name: String,
    /// Dynamic-membership query; `None` for static groups.
    pub query: Option<String>,
    pub created_by: Option<DbId>,
    pub created_on: Timestamp,
}

/// DTO for creating a contact group.
#[derive(Debug, Deserialize)]
pub struct CreateContactGroup {
    pub org_id: DbId,
    pub uuid: Uuid,
    pub name: String,
    pub query: Option<String>,
    pub created_by: Option<DbId>,
}
