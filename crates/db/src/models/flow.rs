use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use relay_core::types::{DbId, Timestamp};

/// A row from the `flows` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Flow {
    pub id: DbId,
    pub org_id: DbId,
    pub uuid: Uuid,
    pub name: String,
    pub flow_type: String,
    pub base_language: Option<String>,
    pub version_number: Option<i32>,
    /// UUID of the entry node within the definition.
    pub entry_uuid: Option<Uuid>,
    /// `R` when the entry node is a rule set, `A` when an action set.
    pub entry_type: Option<String>,
    pub expires_after_minutes: i32,
    pub metadata: serde_json::Value,
    pub created_by: Option<DbId>,
    pub created_on: Timestamp,
}

/// DTO for creating a flow.
#[derive(Debug, Deserialize)]
pub struct CreateFlow {
    pub org_id: DbId,
    pub uuid: Uuid,
    pub name: String,
    pub flow_type: String,
    pub base_language: Option<String>,
    pub version_number: Option<i32>,
    pub entry_uuid: Option<Uuid>,
    pub expires_after_minutes: Option<i32>,
    pub metadata: Option<serde_json::Value>,
    pub created_by: Option<DbId>,
    pub created_on: Option<Timestamp>,
}

/// A row from the `flow_labels` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FlowLabel {
    pub id: DbId,
    pub org_id: DbId,
    pub uuid: Uuid,
    pub name: String,
}

/// A row from the `rule_sets` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RuleSet {
    pub id: DbId,
    pub flow_id: DbId,
    pub uuid: Uuid,
    pub label: Option<String>,
    pub operand: Option<String>,
    pub finished_key: Option<String>,
    pub ruleset_type: Option<String>,
    pub response_type: Option<String>,
    pub x: i32,
    pub y: i32,
    /// Rule list as exported by the source, kept opaque.
    pub rules: serde_json::Value,
    pub config: serde_json::Value,
}

/// DTO for creating a rule set node.
#[derive(Debug, Deserialize)]
pub struct CreateRuleSet {
    pub flow_id: DbId,
    pub uuid: Uuid,
    pub label: Option<String>,
    pub operand: Option<String>,
    pub finished_key: Option<String>,
    pub ruleset_type: Option<String>,
    pub response_type: Option<String>,
    pub x: i32,
    pub y: i32,
    pub rules: serde_json::Value,
    pub config: serde_json::Value,
}

/// A row from the `action_sets` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ActionSet {
    pub id: DbId,
    pub flow_id: DbId,
    pub uuid: Uuid,
    pub destination_uuid: Option<Uuid>,
    pub x: i32,
    pub y: i32,
    /// Action list as exported by the source, kept opaque.
    pub actions: serde_json::Value,
}

/// DTO for creating an action set node.
#[derive(Debug, Deserialize)]
pub struct CreateActionSet {
    pub flow_id: DbId,
    pub uuid: Uuid,
    pub destination_uuid: Option<Uuid>,
    pub x: i32,
    pub y: i32,
    pub actions: serde_json::Value,
}
