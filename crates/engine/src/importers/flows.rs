//! Flow importer: the flow row, its rule-set and action-set nodes, and its
//! labels. Each flow needs a second fetch for its dependency-free
//! definition export.

use std::collections::HashSet;

use async_trait::async_trait;
use uuid::Uuid;

use relay_core::choices::FlowEntryType;
use relay_core::pipeline::ImportPhase;
use relay_core::reference::Reference;
use relay_core::types::DbId;
use relay_db::models::flow::{CreateActionSet, CreateFlow, CreateRuleSet};
use relay_db::repositories::{ActionSetRepo, FlowLabelRepo, FlowRepo, RuleSetRepo};
use relay_remote::resources::{ObjectRef, RemoteFlowDefinition, RemoteFlowSummary};

use crate::context::ImportContext;
use crate::error::EngineError;
use crate::importers::{decode, parse_uuid, Importer, Outcome};
use crate::report::PhaseReport;

pub struct FlowImporter;

#[async_trait]
impl Importer for FlowImporter {
    fn phase(&self) -> ImportPhase {
        ImportPhase::Flows
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

impl FlowImporter {
    async fn import_record(
        &self,
        ctx: &ImportContext,
        record: serde_json::Value,
    ) -> Result<Outcome, EngineError> {
        let Some(summary) = decode::<RemoteFlowSummary>(ImportPhase::Flows, record) else {
            return Ok(Outcome::Failed);
        };
        let Some(uuid) = parse_uuid(summary.uuid.as_deref()) else {
            tracing::warn!("Skipping flow without a UUID");
            return Ok(Outcome::Failed);
        };
        let source = uuid.to_string();

        if ctx.lookup(Reference::Flow, &source).await?.is_some() {
            return Ok(Outcome::Skipped);
        }

        // The listing is only a summary; nodes and languages live in the
        // definition export.
        let definitions = ctx.client().fetch_flow_definition(&source).await?;
        let Some(definition) = definitions
            .into_iter()
            .next()
            .and_then(|doc| decode::<RemoteFlowDefinition>(ImportPhase::Flows, doc))
        else {
            tracing::warn!(flow = %uuid, "Skipping flow without a usable definition");
            return Ok(Outcome::Failed);
        };

        // A flow row may already exist without a ledger entry, e.g. from an
        // interrupted run. Nodes are re-imported either way; the upsert keys
        // on each node's own UUID.
        let (flow, created) = match FlowRepo::find_by_uuid(ctx.pool(), ctx.org_id(), uuid).await? {
            Some(existing) => (existing, false),
            None => {
                let name = summary
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("Flow {uuid}"));
                let flow = FlowRepo::create(
                    ctx.pool(),
                    &CreateFlow {
                        org_id: ctx.org_id(),
                        uuid,
                        name,
                        flow_type: definition
                            .flow_type
                            .clone()
                            .unwrap_or_else(|| "F".to_string()),
                        base_language: definition.base_language.clone(),
                        version_number: definition.version_number(),
                        entry_uuid: parse_uuid(definition.entry.as_deref()),
                        expires_after_minutes: summary.expires,
                        metadata: definition.metadata.clone(),
                        created_by: ctx.initiated_by(),
                        created_on: summary.created_on,
                    },
                )
                .await?;
                (flow, true)
            }
        };
        ctx.record_id(Reference::Flow, &source, flow.id).await?;

        let (rule_uuids, action_uuids) = self.import_nodes(ctx, flow.id, &definition).await?;

        // Deferred pass: the entry node can only be classified once both
        // node collections are in.
        if let Some(entry) = flow.entry_uuid {
            if let Some(entry_type) = classify_entry(entry, &rule_uuids, &action_uuids) {
                FlowRepo::set_entry_type(ctx.pool(), flow.id, entry_type.code()).await?;
            }
        }

        self.attach_labels(ctx, flow.id, &summary.labels).await?;
        Ok(if created {
            Outcome::Created
        } else {
            Outcome::Skipped
        })
    }

    async fn import_nodes(
        &self,
        ctx: &ImportContext,
        flow_id: DbId,
        definition: &RemoteFlowDefinition,
    ) -> Result<(HashSet<Uuid>, HashSet<Uuid>), EngineError> {
        let mut rule_uuids = HashSet::new();
        for rule_set in &definition.rule_sets {
            let Some(uuid) = parse_uuid(rule_set.uuid.as_deref()) else {
                continue;
            };
            RuleSetRepo::upsert(
                ctx.pool(),
                &CreateRuleSet {
                    flow_id,
                    uuid,
                    label: rule_set.label.clone(),
                    operand: rule_set.operand.clone(),
                    finished_key: rule_set.finished_key.clone(),
                    ruleset_type: rule_set.ruleset_type.clone(),
                    response_type: rule_set.response_type.clone(),
                    x: rule_set.x.unwrap_or(0),
                    y: rule_set.y.unwrap_or(0),
                    rules: rule_set.rules.clone().unwrap_or_else(|| serde_json::json!([])),
                    config: rule_set
                        .config
                        .clone()
                        .unwrap_or_else(|| serde_json::json!({})),
                },
            )
            .await?;
            rule_uuids.insert(uuid);
        }

        let mut action_uuids = HashSet::new();
        for action_set in &definition.action_sets {
            let Some(uuid) = parse_uuid(action_set.uuid.as_deref()) else {
                continue;
            };
            ActionSetRepo::upsert(
                ctx.pool(),
                &CreateActionSet {
                    flow_id,
                    uuid,
                    destination_uuid: parse_uuid(action_set.destination.as_deref()),
                    x: action_set.x.unwrap_or(0),
                    y: action_set.y.unwrap_or(0),
                    actions: action_set
                        .actions
                        .clone()
                        .unwrap_or_else(|| serde_json::json!([])),
                },
            )
            .await?;
            action_uuids.insert(uuid);
        }

        Ok((rule_uuids, action_uuids))
    }

    async fn attach_labels(
        &self,
        ctx: &ImportContext,
        flow_id: DbId,
        labels: &[ObjectRef],
    ) -> Result<(), EngineError> {
        for label_ref in labels {
            let Some(uuid) = parse_uuid(label_ref.uuid.as_deref()) else {
                continue;
            };
            let label =
                match FlowLabelRepo::find_by_uuid(ctx.pool(), ctx.org_id(), uuid).await? {
                    Some(existing) => existing,
                    None => {
                        let Some(name) = label_ref.name.as_deref().filter(|n| !n.is_empty())
                        else {
                            continue;
                        };
                        FlowLabelRepo::create(ctx.pool(), ctx.org_id(), uuid, name).await?
                    }
                };
            FlowLabelRepo::link_flow(ctx.pool(), flow_id, label.id).await?;
        }
        Ok(())
    }
}

/// Classify a flow's entry node against its imported node collections.
/// `None` when the entry UUID matches neither; the column stays NULL.
fn classify_entry(
    entry: Uuid,
    rule_uuids: &HashSet<Uuid>,
    action_uuids: &HashSet<Uuid>,
) -> Option<FlowEntryType> {
    if rule_uuids.contains(&entry) {
        Some(FlowEntryType::Rules)
    } else if action_uuids.contains(&entry) {
        Some(FlowEntryType::Actions)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn entry_matching_rule_set_is_r() {
        let ids = uuids(2);
        let rules: HashSet<Uuid> = ids.iter().copied().collect();
        let actions = HashSet::new();
        assert_eq!(
            classify_entry(ids[0], &rules, &actions),
            Some(FlowEntryType::Rules)
        );
    }

    #[test]
    fn entry_matching_action_set_is_a() {
        let ids = uuids(2);
        let rules = HashSet::new();
        let actions: HashSet<Uuid> = ids.iter().copied().collect();
        assert_eq!(
            classify_entry(ids[1], &rules, &actions),
            Some(FlowEntryType::Actions)
        );
    }

    #[test]
    fn unknown_entry_stays_unclassified() {
        let rules: HashSet<Uuid> = uuids(1).into_iter().collect();
        let actions: HashSet<Uuid> = uuids(1).into_iter().collect();
        assert_eq!(classify_entry(Uuid::new_v4(), &rules, &actions), None);
    }

    #[test]
    fn rule_sets_win_over_action_sets_on_collision() {
        let id = Uuid::new_v4();
        let rules: HashSet<Uuid> = [id].into_iter().collect();
        let actions: HashSet<Uuid> = [id].into_iter().collect();
        assert_eq!(
            classify_entry(id, &rules, &actions),
            Some(FlowEntryType::Rules)
        );
    }
}
