//! Typed transfer objects for remote API records.
//!
//! One struct per entity kind, mirroring the fields the importers consume.
//! Every field the remote may omit is an `Option`; collections default to
//! empty. Records are decoded individually (`serde_json::from_value`) so a
//! malformed record fails on its own, not the whole page.

use std::collections::HashMap;

use serde::Deserialize;

/// All remote timestamps are RFC 3339 UTC strings.
pub type RemoteTimestamp = chrono::DateTime<chrono::Utc>;

/// A `{uuid, name}` reference to another remote object.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectRef {
    pub uuid: Option<String>,
    pub name: Option<String>,
}

/// A contact record from the `contacts` resource.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteContact {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub urns: Vec<String>,
    #[serde(default)]
    pub groups: Vec<ObjectRef>,
    #[serde(default)]
    pub fields: HashMap<String, serde_json::Value>,
    pub blocked: Option<bool>,
    pub stopped: Option<bool>,
    pub created_on: Option<RemoteTimestamp>,
    pub modified_on: Option<RemoteTimestamp>,
}

/// A contact group record from the `groups` resource.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteGroup {
    pub uuid: Option<String>,
    pub name: Option<String>,
    /// Saved dynamic-membership query, absent for static groups.
    pub query: Option<String>,
}

/// A flow summary from the `flows` resource. The full definition comes from
/// a second call to the `definitions` resource.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFlowSummary {
    pub uuid: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub labels: Vec<ObjectRef>,
    /// Run expiry in minutes.
    pub expires: Option<i32>,
    pub archived: Option<bool>,
    pub created_on: Option<RemoteTimestamp>,
}

/// One flow document from the `definitions` export envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFlowDefinition {
    pub base_language: Option<String>,
    pub flow_type: Option<String>,
    /// Export version; the remote serializes it as a number or a numeric
    /// string depending on age. See [`RemoteFlowDefinition::version_number`].
    pub version: Option<serde_json::Value>,
    /// UUID of the entry node.
    pub entry: Option<String>,
    pub metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub action_sets: Vec<RemoteActionSet>,
    #[serde(default)]
    pub rule_sets: Vec<RemoteRuleSet>,
}

impl RemoteFlowDefinition {
    /// Coerce the export version to an integer, tolerating `10`, `10.4`,
    /// and `"10.4"` spellings.
    pub fn version_number(&self) -> Option<i32> {
        match self.version.as_ref()? {
            serde_json::Value::Number(n) => n.as_f64().map(|v| v as i32),
            serde_json::Value::String(s) => s.parse::<f64>().ok().map(|v| v as i32),
            _ => None,
        }
    }
}

/// A rule-set node inside a flow definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRuleSet {
    pub uuid: Option<String>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub label: Option<String>,
    pub operand: Option<String>,
    pub finished_key: Option<String>,
    pub ruleset_type: Option<String>,
    pub response_type: Option<String>,
    /// Nested rule list, stored locally as an opaque jsonb blob.
    pub rules: Option<serde_json::Value>,
    /// Nested node configuration, stored locally as an opaque jsonb blob.
    pub config: Option<serde_json::Value>,
}

/// An action-set node inside a flow definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteActionSet {
    pub uuid: Option<String>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    /// UUID of the node this one leads to, if any.
    pub destination: Option<String>,
    /// Nested action list, stored locally as an opaque jsonb blob.
    pub actions: Option<serde_json::Value>,
}

/// A campaign record from the `campaigns` resource.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCampaign {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub group: Option<ObjectRef>,
    pub created_on: Option<RemoteTimestamp>,
}

/// The contact field a campaign event schedules relative to.
#[derive(Debug, Clone, Deserialize)]
pub struct RelativeToRef {
    pub key: Option<String>,
    pub label: Option<String>,
}

/// A campaign event record from the `campaign_events` resource.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCampaignEvent {
    pub uuid: Option<String>,
    pub campaign: Option<ObjectRef>,
    pub unit: Option<String>,
    pub offset: Option<i32>,
    pub delivery_hour: Option<i32>,
    /// Static message for single-message events; either a plain string or
    /// a translations object. See [`RemoteCampaignEvent::message_text`].
    pub message: Option<serde_json::Value>,
    pub relative_to: Option<RelativeToRef>,
    /// Absent for single-message events.
    pub flow: Option<ObjectRef>,
    pub created_on: Option<RemoteTimestamp>,
}

impl RemoteCampaignEvent {
    /// The event's message as plain text: the string itself, or the first
    /// translation when the remote sends a language-keyed object.
    pub fn message_text(&self) -> Option<String> {
        match self.message.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(map) => map
                .values()
                .find_map(|v| v.as_str())
                .map(|s| s.to_string()),
            _ => None,
        }
    }
}

/// A flow start record from the `flow_starts` resource.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFlowStart {
    pub uuid: Option<String>,
    pub flow: Option<ObjectRef>,
    pub status: Option<String>,
    #[serde(default)]
    pub groups: Vec<ObjectRef>,
    #[serde(default)]
    pub contacts: Vec<ObjectRef>,
    pub restart_participants: Option<bool>,
    pub extra: Option<serde_json::Value>,
    pub created_on: Option<RemoteTimestamp>,
}

/// One recorded rule-set value inside a run.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRunValue {
    /// The raw value; numbers arrive unquoted.
    pub value: Option<serde_json::Value>,
    pub category: Option<String>,
    /// UUID of the rule-set node the value was captured at.
    pub node: Option<String>,
    pub time: Option<RemoteTimestamp>,
}

impl RemoteRunValue {
    /// The raw value as text, the way it is classified and stored.
    pub fn value_text(&self) -> Option<String> {
        match self.value.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// One step in a run's execution path.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRunStep {
    /// UUID of the node the run arrived at.
    pub node: Option<String>,
    pub time: Option<RemoteTimestamp>,
}

/// A flow run record from the `runs` resource. Runs have no remote UUID;
/// the numeric `id` is the ledger key.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRun {
    pub id: Option<i64>,
    pub flow: Option<ObjectRef>,
    pub contact: Option<ObjectRef>,
    pub start: Option<ObjectRef>,
    pub responded: Option<bool>,
    #[serde(default)]
    pub path: Vec<RemoteRunStep>,
    #[serde(default)]
    pub values: HashMap<String, RemoteRunValue>,
    pub exit_type: Option<String>,
    pub created_on: Option<RemoteTimestamp>,
    pub modified_on: Option<RemoteTimestamp>,
    pub exited_on: Option<RemoteTimestamp>,
}

/// A broadcast record from the `broadcasts` resource. No remote UUID; the
/// numeric `id` is the ledger key.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteBroadcast {
    pub id: Option<i64>,
    #[serde(default)]
    pub urns: Vec<String>,
    #[serde(default)]
    pub contacts: Vec<ObjectRef>,
    #[serde(default)]
    pub groups: Vec<ObjectRef>,
    /// Either a plain string or a translations object.
    pub text: Option<serde_json::Value>,
    pub created_on: Option<RemoteTimestamp>,
}

impl RemoteBroadcast {
    /// The broadcast text as plain text (first translation when keyed).
    pub fn text_value(&self) -> Option<String> {
        match self.text.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(map) => map
                .values()
                .find_map(|v| v.as_str())
                .map(|s| s.to_string()),
            _ => None,
        }
    }
}

/// A message record from the `messages` resource. No remote UUID; the
/// numeric `id` is the ledger key.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteMessage {
    pub id: Option<i64>,
    /// Remote broadcast id, resolved through the ledger.
    pub broadcast: Option<i64>,
    pub contact: Option<ObjectRef>,
    pub urn: Option<String>,
    pub channel: Option<ObjectRef>,
    pub direction: Option<String>,
    #[serde(rename = "type")]
    pub msg_type: Option<String>,
    pub status: Option<String>,
    pub archived: Option<bool>,
    pub visibility: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub labels: Vec<ObjectRef>,
    pub media: Option<String>,
    pub created_on: Option<RemoteTimestamp>,
    pub modified_on: Option<RemoteTimestamp>,
}

/// A message label record from the `labels` resource.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteLabel {
    pub uuid: Option<String>,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_decodes_from_api_payload() {
        let raw = serde_json::json!({
            "uuid": "c1",
            "name": "Ann",
            "urns": ["tel:+1555"],
            "groups": [],
            "fields": {},
            "blocked": false,
            "stopped": false,
            "created_on": "2017-01-30T14:05:33.123Z"
        });
        let contact: RemoteContact = serde_json::from_value(raw).unwrap();
        assert_eq!(contact.uuid.as_deref(), Some("c1"));
        assert_eq!(contact.urns, vec!["tel:+1555"]);
        assert!(contact.groups.is_empty());
        assert!(contact.created_on.is_some());
    }

    #[test]
    fn contact_tolerates_missing_collections() {
        let contact: RemoteContact = serde_json::from_value(serde_json::json!({
            "uuid": "c2"
        }))
        .unwrap();
        assert!(contact.urns.is_empty());
        assert!(contact.fields.is_empty());
        assert!(contact.blocked.is_none());
    }

    #[test]
    fn definition_version_tolerates_number_and_string() {
        let mut def: RemoteFlowDefinition = serde_json::from_value(serde_json::json!({
            "version": "10.4"
        }))
        .unwrap();
        assert_eq!(def.version_number(), Some(10));

        def.version = Some(serde_json::json!(8));
        assert_eq!(def.version_number(), Some(8));

        def.version = None;
        assert_eq!(def.version_number(), None);
    }

    #[test]
    fn campaign_event_message_text_handles_translations() {
        let event: RemoteCampaignEvent = serde_json::from_value(serde_json::json!({
            "uuid": "e1",
            "message": {"eng": "Hello"},
            "unit": "days"
        }))
        .unwrap();
        assert_eq!(event.message_text().as_deref(), Some("Hello"));

        let plain: RemoteCampaignEvent = serde_json::from_value(serde_json::json!({
            "uuid": "e2",
            "message": "Hi there"
        }))
        .unwrap();
        assert_eq!(plain.message_text().as_deref(), Some("Hi there"));
    }

    #[test]
    fn run_decodes_values_and_path() {
        let raw = serde_json::json!({
            "id": 4092373,
            "flow": {"uuid": "f1", "name": "Registration"},
            "contact": {"uuid": "c1", "name": "Ann"},
            "responded": true,
            "path": [
                {"node": "a1", "time": "2017-01-30T14:05:33.123Z"},
                {"node": "r1", "time": "2017-01-30T14:06:00.000Z"}
            ],
            "values": {
                "color": {
                    "value": "blue",
                    "category": "Blue",
                    "node": "r1",
                    "time": "2017-01-30T14:06:00.000Z"
                }
            },
            "created_on": "2017-01-30T14:05:33.123Z",
            "exit_type": "completed"
        });
        let run: RemoteRun = serde_json::from_value(raw).unwrap();
        assert_eq!(run.id, Some(4092373));
        assert_eq!(run.path.len(), 2);
        assert_eq!(
            run.values.get("color").unwrap().value_text().as_deref(),
            Some("blue")
        );
    }

    #[test]
    fn run_value_text_stringifies_numbers() {
        let value: RemoteRunValue = serde_json::from_value(serde_json::json!({
            "value": 42,
            "category": "Number"
        }))
        .unwrap();
        assert_eq!(value.value_text().as_deref(), Some("42"));
    }

    #[test]
    fn message_decodes_with_type_rename() {
        let raw = serde_json::json!({
            "id": 4105426,
            "broadcast": 2690007,
            "contact": {"uuid": "c1", "name": "Ann"},
            "urn": "tel:+1555",
            "channel": {"uuid": "ch1", "name": "Main"},
            "direction": "out",
            "type": "inbox",
            "status": "wired",
            "archived": false,
            "visibility": "visible",
            "text": "How are you?",
            "labels": [{"uuid": "l1", "name": "Important"}],
            "created_on": "2016-01-06T15:33:00.813Z"
        });
        let msg: RemoteMessage = serde_json::from_value(raw).unwrap();
        assert_eq!(msg.msg_type.as_deref(), Some("inbox"));
        assert_eq!(msg.broadcast, Some(2690007));
        assert_eq!(msg.labels.len(), 1);
    }

    #[test]
    fn broadcast_text_handles_translations() {
        let broadcast: RemoteBroadcast = serde_json::from_value(serde_json::json!({
            "id": 1,
            "text": {"base": "hello"}
        }))
        .unwrap();
        assert_eq!(broadcast.text_value().as_deref(), Some("hello"));
    }

    #[test]
    fn flow_start_defaults_collections() {
        let start: RemoteFlowStart = serde_json::from_value(serde_json::json!({
            "uuid": "fs1",
            "flow": {"uuid": "f1", "name": "Registration"},
            "status": "complete"
        }))
        .unwrap();
        assert!(start.contacts.is_empty());
        assert!(start.groups.is_empty());
    }
}
