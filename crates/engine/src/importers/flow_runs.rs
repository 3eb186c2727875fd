//! Flow run importer: the run row, its recorded values, and its path steps.
//!
//! Runs carry no remote UUID; the remote numeric id keyed through the
//! ledger is the dedup gate.

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use relay_core::choices::{FlowEntryType, RunExitType};
use relay_core::pipeline::ImportPhase;
use relay_core::reference::Reference;
use relay_core::values::classify_value;
use relay_db::models::flow::RuleSet;
use relay_db::models::flow_run::{CreateFlowRun, UpsertRunValue};
use relay_db::repositories::{
    ActionSetRepo, FlowRepo, FlowRunRepo, FlowStepRepo, RuleSetRepo, RunValueRepo,
};
use relay_remote::resources::RemoteRun;

use crate::context::ImportContext;
use crate::error::EngineError;
use crate::importers::{decode, parse_uuid, Importer, Outcome};
use crate::report::PhaseReport;

pub struct FlowRunImporter;

#[async_trait]
impl Importer for FlowRunImporter {
    fn phase(&self) -> ImportPhase {
        ImportPhase::FlowRuns
    }

    async fn run(&self, ctx: &ImportContext) -> Result<PhaseReport, EngineError> {
        let mut report = PhaseReport::new(self.phase());
        let mut pages = ctx
            .client()
            .fetch_all(ctx.client().request_url(self.phase().resource()));

        while let Some(records) = pages.next().await? {
            for record in records {
                self.import_record(ctx, record).await?.tally(&mut report);
            }
        }
        Ok(report)
    }
}

impl FlowRunImporter {
    async fn import_record(
        &self,
        ctx: &ImportContext,
        record: serde_json::Value,
    ) -> Result<Outcome, EngineError> {
        let Some(remote) = decode::<RemoteRun>(ImportPhase::FlowRuns, record) else {
            return Ok(Outcome::Failed);
        };
        let Some(remote_id) = remote.id else {
            tracing::warn!("Skipping run without an id");
            return Ok(Outcome::Failed);
        };
        let source = remote_id.to_string();

        if ctx.lookup(Reference::FlowRun, &source).await?.is_some() {
            return Ok(Outcome::Skipped);
        }

        let flow_uuid = parse_uuid(remote.flow.as_ref().and_then(|f| f.uuid.as_deref()));
        let flow_id = match flow_uuid {
            Some(flow_uuid) => {
                ctx.lookup_id(Reference::Flow, &flow_uuid.to_string())
                    .await?
            }
            None => None,
        };
        let Some(flow_id) = flow_id else {
            tracing::warn!(run = remote_id, "Skipping run of unimported flow");
            return Ok(Outcome::Skipped);
        };

        let contact_uuid = parse_uuid(remote.contact.as_ref().and_then(|c| c.uuid.as_deref()));
        let contact_id = match contact_uuid {
            Some(contact_uuid) => {
                ctx.lookup_id(Reference::Contact, &contact_uuid.to_string())
                    .await?
            }
            None => None,
        };
        let Some(contact_id) = contact_id else {
            tracing::warn!(run = remote_id, "Skipping run of unimported contact");
            return Ok(Outcome::Skipped);
        };

        let start_id = match parse_uuid(remote.start.as_ref().and_then(|s| s.uuid.as_deref())) {
            Some(start_uuid) => {
                ctx.lookup_id(Reference::FlowStart, &start_uuid.to_string())
                    .await?
            }
            None => None,
        };

        // Expiry is derived from the flow's configured window, anchored at
        // the run's own creation time.
        let flow = FlowRepo::find_by_id(ctx.pool(), flow_id).await?;
        let expires_on = flow.as_ref().and_then(|f| {
            remote
                .created_on
                .map(|created| created + chrono::Duration::minutes(f.expires_after_minutes as i64))
        });

        let exit_type = remote
            .exit_type
            .as_deref()
            .and_then(RunExitType::from_remote)
            .map(|e| e.code().to_string());

        let run = FlowRunRepo::create(
            ctx.pool(),
            &CreateFlowRun {
                org_id: ctx.org_id(),
                flow_id,
                contact_id,
                start_id,
                responded: remote.responded.unwrap_or(false),
                exit_type,
                created_on: remote.created_on,
                modified_on: remote.modified_on,
                exited_on: remote.exited_on,
                expires_on,
            },
        )
        .await?;
        ctx.record_id(Reference::FlowRun, &source, run.id).await?;

        let rule_sets: HashMap<Uuid, RuleSet> = RuleSetRepo::list_by_flow(ctx.pool(), flow_id)
            .await?
            .into_iter()
            .map(|rs| (rs.uuid, rs))
            .collect();
        let action_destinations: HashMap<Uuid, Option<Uuid>> =
            ActionSetRepo::list_by_flow(ctx.pool(), flow_id)
                .await?
                .into_iter()
                .map(|a| (a.uuid, a.destination_uuid))
                .collect();

        let fallback_time = remote.created_on.unwrap_or(run.created_on);

        // Value loop: one stored value per rule set the run answered at,
        // each answer also recording a rule-set path step.
        for (key, remote_value) in &remote.values {
            let Some(node_uuid) = parse_uuid(remote_value.node.as_deref()) else {
                tracing::warn!(run = remote_id, value = %key, "Skipping value without a node");
                continue;
            };
            let Some(rule_set) = rule_sets.get(&node_uuid) else {
                tracing::warn!(run = remote_id, value = %key, node = %node_uuid, "Skipping value at unknown rule set");
                continue;
            };
            let Some(category) = remote_value.category.as_deref() else {
                tracing::warn!(run = remote_id, value = %key, "Skipping value without a category");
                continue;
            };
            let Some(rule) = match_rule(&rule_set.rules, category) else {
                tracing::warn!(run = remote_id, value = %key, category, "Skipping value with no matching rule");
                continue;
            };

            let raw = remote_value.value_text().unwrap_or_default();
            let classified = classify_value(&raw);
            RunValueRepo::upsert(
                ctx.pool(),
                &UpsertRunValue {
                    org_id: ctx.org_id(),
                    run_id: run.id,
                    contact_id,
                    rule_set_id: rule_set.id,
                    rule_uuid: rule_uuid(rule),
                    category: Some(category.to_string()),
                    string_value: Some(classified.string_value),
                    decimal_value: classified.decimal_value,
                    datetime_value: classified.datetime_value,
                    media_value: classified.media_value,
                },
            )
            .await?;

            let arrived_on = remote_value.time.unwrap_or(fallback_time);
            FlowStepRepo::record(
                ctx.pool(),
                run.id,
                node_uuid,
                FlowEntryType::Rules.code(),
                rule_destination(rule),
                arrived_on,
            )
            .await?;
        }

        // Path loop: the remaining steps are the action-set nodes the run
        // passed through. The run's full path is the union of both loops.
        for step in &remote.path {
            let Some(node_uuid) = parse_uuid(step.node.as_deref()) else {
                continue;
            };
            let Some(destination) = action_destinations.get(&node_uuid) else {
                continue;
            };
            let arrived_on = step.time.unwrap_or(fallback_time);
            FlowStepRepo::record(
                ctx.pool(),
                run.id,
                node_uuid,
                FlowEntryType::Actions.code(),
                *destination,
                arrived_on,
            )
            .await?;
        }

        Ok(Outcome::Created)
    }
}

/// Find the first rule whose category matches the recorded category.
///
/// Rule categories are either plain strings or language-keyed translation
/// objects; a translation match counts.
fn match_rule<'a>(rules: &'a serde_json::Value, category: &str) -> Option<&'a serde_json::Value> {
    rules
        .as_array()?
        .iter()
        .find(|rule| category_matches(&rule["category"], category))
}

fn category_matches(rule_category: &serde_json::Value, category: &str) -> bool {
    match rule_category {
        serde_json::Value::String(s) => s == category,
        serde_json::Value::Object(map) => map.values().any(|v| v.as_str() == Some(category)),
        _ => false,
    }
}

/// The matched rule's UUID, when present and well-formed.
fn rule_uuid(rule: &serde_json::Value) -> Option<Uuid> {
    rule["uuid"].as_str().and_then(|s| Uuid::parse_str(s).ok())
}

/// The node the matched rule routes to, recorded as the step's destination.
fn rule_destination(rule: &serde_json::Value) -> Option<Uuid> {
    rule["destination"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> serde_json::Value {
        serde_json::json!([
            {
                "uuid": "7be554e4-e4a4-40e7-9eb4-92e232b0f2bf",
                "category": {"base": "Blue", "fra": "Bleu"},
                "destination": "b8f32132-5158-4c9c-98ef-c4fbd8e103c9"
            },
            {"uuid": "e329dcb6-cbca-4abc-ae4e-35f756b418d7", "category": "Other"}
        ])
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = rules();
        let rule = match_rule(&rules, "Blue").unwrap();
        assert_eq!(
            rule_uuid(rule).unwrap().to_string(),
            "7be554e4-e4a4-40e7-9eb4-92e232b0f2bf"
        );
    }

    #[test]
    fn translation_match_counts() {
        let rules = rules();
        assert!(match_rule(&rules, "Bleu").is_some());
    }

    #[test]
    fn plain_string_category_matches() {
        let rules = rules();
        let rule = match_rule(&rules, "Other").unwrap();
        assert_eq!(
            rule_uuid(rule).unwrap().to_string(),
            "e329dcb6-cbca-4abc-ae4e-35f756b418d7"
        );
    }

    #[test]
    fn unmatched_category_yields_none() {
        let rules = rules();
        assert!(match_rule(&rules, "Green").is_none());
    }

    #[test]
    fn non_array_rules_yield_none() {
        assert!(match_rule(&serde_json::json!({}), "Blue").is_none());
    }

    #[test]
    fn matched_rule_carries_its_destination() {
        let rules = rules();
        let rule = match_rule(&rules, "Blue").unwrap();
        assert_eq!(
            rule_destination(rule).unwrap().to_string(),
            "b8f32132-5158-4c9c-98ef-c4fbd8e103c9"
        );
    }

    #[test]
    fn rule_without_destination_yields_none() {
        let rules = rules();
        let rule = match_rule(&rules, "Other").unwrap();
        assert!(rule_destination(rule).is_none());
    }
}
