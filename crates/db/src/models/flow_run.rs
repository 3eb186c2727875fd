use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use relay_core::types::{DbId, Timestamp};

/// A row from the `flow_runs` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FlowRun {
    pub id: DbId,
    pub org_id: DbId,
    pub flow_id: DbId,
    pub contact_id: DbId,
    pub start_id: Option<DbId>,
    pub responded: bool,
    /// `C` completed, `I` interrupted, `E` expired.
    pub exit_type: Option<String>,
    pub created_on: Timestamp,
    pub modified_on: Timestamp,
    pub exited_on: Option<Timestamp>,
    pub expires_on: Option<Timestamp>,
}

/// DTO for creating a flow run.
#[derive(Debug, Deserialize)]
pub struct CreateFlowRun {
    pub org_id: DbId,
    pub flow_id: DbId,
    pub contact_id: DbId,
    pub start_id: Option<DbId>,
    pub responded: bool,
    pub exit_type: Option<String>,
    pub created_on: Option<Timestamp>,
    pub modified_on: Option<Timestamp>,
    pub exited_on: Option<Timestamp>,
    pub expires_on: Option<Timestamp>,
}

/// A row from the `flow_steps` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FlowStep {
    pub id: DbId,
    pub run_id: DbId,
    pub node_uuid: Uuid,
    /// `R` for rule-set nodes, `A` for action-set nodes.
    pub step_type: String,
    /// Destination node the run moved on to, when the source recorded one.
    pub next_uuid: Option<Uuid>,
    pub arrived_on: Timestamp,
}

/// A row from the `run_values` table. One value per run + rule set; new
/// answers overwrite the row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RunValue {
    pub id: DbId,
    pub org_id: DbId,
    pub run_id: DbId,
    pub contact_id: DbId,
    pub rule_set_id: DbId,
    pub rule_uuid: Option<Uuid>,
    pub category: Option<String>,
    pub string_value: Option<String>,
    pub decimal_value: Option<f64>,
    pub datetime_value: Option<Timestamp>,
    pub media_value: Option<String>,
}

/// DTO for upserting a run value.
#[derive(Debug, Deserialize)]
pub struct UpsertRunValue {
    pub org_id: DbId,
    pub run_id: DbId,
    pub contact_id: DbId,
    pub rule_set_id: DbId,
    pub rule_uuid: Option<Uuid>,
    pub category: Option<String>,
    pub string_value: Option<String>,
    pub decimal_value: Option<f64>,
    pub datetime_value: Option<Timestamp>,
    pub media_value: Option<String>,
}
