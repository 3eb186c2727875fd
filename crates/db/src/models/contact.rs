use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use relay_core::types::{DbId, Timestamp};

/// A row from the `contacts` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Contact {
    pub id: DbId,
    pub org_id: DbId,
    pub uuid: Uuid,
    pub name: Option<String>,
    pub language: Option<String>,
    pub is_blocked: bool,
    pub is_stopped: bool,
    pub created_by: Option<DbId>,
    pub created_on: Timestamp,
    pub modified_on: Timestamp,
}

/// DTO for creating a contact.
#[derive(Debug, Deserialize)]
pub struct CreateContact {
    pub org_id: DbId,
    pub uuid: Uuid,
    pub name: Option<String>,
    pub language: Option<String>,
    pub is_blocked: bool,
    pub is_stopped: bool,
    pub created_by: Option<DbId>,
    pub created_on: Option<Timestamp>,
    pub modified_on: Option<Timestamp>,
}

/// A row from the `contact_urns` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContactUrn {
    pub id: DbId,
    pub org_id: DbId,
    pub contact_id: Option<DbId>,
    pub scheme: String,
    pub path: String,
    pub display: Option<String>,
}

/// A row from the `contact_field_values` table. At most one of the typed
/// value columns is read at query time; all parses are stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContactFieldValue {
    pub id: DbId,
    pub org_id: DbId,
    pub contact_id: DbId,
    pub key: String,
    pub string_value: Option<String>,
    pub decimal_value: Option<f64>,
    pub datetime_value: Option<Timestamp>,
    pub media_value: Option<String>,
}
