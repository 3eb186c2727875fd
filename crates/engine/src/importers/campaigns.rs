//! Campaign importer: campaigns, their events, and the minimal
//! single-message flows synthesized for events that carry a message
//! instead of a flow reference.

use async_trait::async_trait;
use uuid::Uuid;

use relay_core::choices::{EventType, EventUnit, FlowEntryType, FLOW_TYPE_MESSAGE};
use relay_core::pipeline::ImportPhase;
use relay_core::reference::Reference;
use relay_core::types::DbId;
use relay_db::models::flow::{CreateActionSet, CreateFlow};
use relay_db::models::campaign::CreateCampaignEvent;
use relay_db::repositories::{ActionSetRepo, CampaignEventRepo, CampaignRepo, FlowRepo};
use relay_remote::resources::{RemoteCampaign, RemoteCampaignEvent};

use crate::context::ImportContext;
use crate::error::EngineError;
use crate::importers::{decode, groups, parse_uuid, Importer, Outcome};
use crate::report::PhaseReport;

pub struct CampaignImporter;

#[async_trait]
impl Importer for CampaignImporter {
    fn phase(&self) -> ImportPhase {
        ImportPhase::Campaigns
    }

    async fn run(&self, ctx: &ImportContext) -> Result<PhaseReport, EngineError> {
        let mut report = PhaseReport::new(self.phase());

        let mut pages = ctx
            .client()
            .fetch_all(ctx.client().request_url(self.phase().resource()));
        while let Some(records) = pages.next().await? {
            for record in records {
                self.import_campaign(ctx, record).await?.tally(&mut report);
            }
        }

        // Events are a separate resource and can only be imported once
        // every campaign has been attempted.
        let mut pages = ctx
            .client()
            .fetch_all(ctx.client().request_url("campaign_events"));
        while let Some(records) = pages.next().await? {
            for record in records {
                self.import_event(ctx, record).await?.tally(&mut report);
            }
        }

        Ok(report)
    }
}

impl CampaignImporter {
    async fn import_campaign(
        &self,
        ctx: &ImportContext,
        record: serde_json::Value,
    ) -> Result<Outcome, EngineError> {
        let Some(remote) = decode::<RemoteCampaign>(ImportPhase::Campaigns, record) else {
            return Ok(Outcome::Failed);
        };
        let Some(uuid) = parse_uuid(remote.uuid.as_deref()) else {
            tracing::warn!("Skipping campaign without a UUID");
            return Ok(Outcome::Failed);
        };
        let source = uuid.to_string();

        if ctx.lookup(Reference::Campaign, &source).await?.is_some() {
            return Ok(Outcome::Skipped);
        }

        if let Some(existing) = CampaignRepo::find_by_uuid(ctx.pool(), ctx.org_id(), uuid).await? {
            ctx.record_id(Reference::Campaign, &source, existing.id)
                .await?;
            return Ok(Outcome::Skipped);
        }

        // The target group may not have appeared in the groups resource
        // (e.g. since deleted there); create it lazily from the reference.
        let group_ref = remote.group.as_ref();
        let group_id = match parse_uuid(group_ref.and_then(|g| g.uuid.as_deref())) {
            Some(group_uuid) => {
                groups::resolve_or_create_group(
                    ctx,
                    group_uuid,
                    group_ref.and_then(|g| g.name.as_deref()),
                )
                .await?
            }
            None => None,
        };
        let Some(group_id) = group_id else {
            tracing::warn!(campaign = %uuid, "Skipping campaign without a resolvable group");
            return Ok(Outcome::Skipped);
        };

        let Some(name) = remote.name.as_deref().filter(|n| !n.is_empty()) else {
            tracing::warn!(campaign = %uuid, "Skipping campaign without a name");
            return Ok(Outcome::Failed);
        };

        let campaign = CampaignRepo::create(
            ctx.pool(),
            ctx.org_id(),
            uuid,
            name,
            group_id,
            ctx.initiated_by(),
        )
        .await?;
        ctx.record_id(Reference::Campaign, &source, campaign.id)
            .await?;
        Ok(Outcome::Created)
    }

    async fn import_event(
        &self,
        ctx: &ImportContext,
        record: serde_json::Value,
    ) -> Result<Outcome, EngineError> {
        let Some(remote) = decode::<RemoteCampaignEvent>(ImportPhase::Campaigns, record) else {
            return Ok(Outcome::Failed);
        };
        let Some(uuid) = parse_uuid(remote.uuid.as_deref()) else {
            tracing::warn!("Skipping campaign event without a UUID");
            return Ok(Outcome::Failed);
        };

        // Events whose campaign failed to import are skipped with it.
        let campaign_uuid =
            parse_uuid(remote.campaign.as_ref().and_then(|c| c.uuid.as_deref()));
        let Some(campaign_uuid) = campaign_uuid else {
            tracing::warn!(event = %uuid, "Skipping event without a campaign reference");
            return Ok(Outcome::Failed);
        };
        let Some(campaign_id) = ctx
            .lookup_id(Reference::Campaign, &campaign_uuid.to_string())
            .await?
        else {
            tracing::warn!(event = %uuid, campaign = %campaign_uuid, "Skipping event of unimported campaign");
            return Ok(Outcome::Skipped);
        };

        if CampaignEventRepo::find_by_uuid(ctx.pool(), campaign_id, uuid)
            .await?
            .is_some()
        {
            return Ok(Outcome::Skipped);
        }

        let unit = remote
            .unit
            .as_deref()
            .and_then(EventUnit::from_remote)
            .unwrap_or(EventUnit::Days);

        let flow_uuid = parse_uuid(remote.flow.as_ref().and_then(|f| f.uuid.as_deref()));
        let (event_type, flow_id, message) = match flow_uuid {
            Some(flow_uuid) => {
                let Some(flow_id) = ctx
                    .lookup_id(Reference::Flow, &flow_uuid.to_string())
                    .await?
                else {
                    tracing::warn!(event = %uuid, flow = %flow_uuid, "Skipping event of unimported flow");
                    return Ok(Outcome::Skipped);
                };
                (EventType::Flow, Some(flow_id), None)
            }
            None => {
                let Some(text) = remote.message_text() else {
                    tracing::warn!(event = %uuid, "Skipping event with neither flow nor message");
                    return Ok(Outcome::Failed);
                };
                let flow_id = self.synthesize_message_flow(ctx, &text).await?;
                (EventType::Message, Some(flow_id), Some(text))
            }
        };

        CampaignEventRepo::create(
            ctx.pool(),
            &CreateCampaignEvent {
                campaign_id,
                uuid,
                event_type: event_type.code().to_string(),
                offset_value: remote.offset.unwrap_or(0),
                unit: unit.code().to_string(),
                delivery_hour: remote.delivery_hour.unwrap_or(-1),
                relative_to_key: remote.relative_to.as_ref().and_then(|r| r.key.clone()),
                message,
                flow_id,
                created_on: remote.created_on,
            },
        )
        .await?;
        Ok(Outcome::Created)
    }

    /// Create a minimal one-node flow whose sole action replies with the
    /// event's message.
    async fn synthesize_message_flow(
        &self,
        ctx: &ImportContext,
        text: &str,
    ) -> Result<DbId, EngineError> {
        let flow_uuid = Uuid::new_v4();
        let entry_uuid = Uuid::new_v4();

        let flow = FlowRepo::create(
            ctx.pool(),
            &CreateFlow {
                org_id: ctx.org_id(),
                uuid: flow_uuid,
                name: single_message_flow_name(text),
                flow_type: FLOW_TYPE_MESSAGE.to_string(),
                base_language: None,
                version_number: None,
                entry_uuid: Some(entry_uuid),
                expires_after_minutes: None,
                metadata: None,
                created_by: ctx.initiated_by(),
                created_on: None,
            },
        )
        .await?;

        ActionSetRepo::upsert(
            ctx.pool(),
            &CreateActionSet {
                flow_id: flow.id,
                uuid: entry_uuid,
                destination_uuid: None,
                x: 0,
                y: 0,
                actions: reply_actions(text),
            },
        )
        .await?;
        FlowRepo::set_entry_type(ctx.pool(), flow.id, FlowEntryType::Actions.code()).await?;

        Ok(flow.id)
    }
}

/// The action list of a synthesized single-message flow: one reply action.
fn reply_actions(text: &str) -> serde_json::Value {
    serde_json::json!([{ "type": "reply", "msg": text }])
}

/// Name for a synthesized single-message flow, keyed on the message text.
fn single_message_flow_name(text: &str) -> String {
    let preview: String = text.chars().take(32).collect();
    format!("Single Message ({preview})")
}
