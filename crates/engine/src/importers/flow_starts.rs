//! Flow start importer.

use async_trait::async_trait;

use relay_core::choices::FlowStartStatus;
use relay_core::pipeline::ImportPhase;
use relay_core::reference::Reference;
use relay_db::models::flow_start::CreateFlowStart;
use relay_db::repositories::FlowStartRepo;
use relay_remote::resources::RemoteFlowStart;

use crate::context::ImportContext;
use crate::error::EngineError;
use crate::importers::{decode, parse_uuid, Importer, Outcome};
use crate::report::PhaseReport;

pub struct FlowStartImporter;

#[async_trait]
impl Importer for FlowStartImporter {
    fn phase(&self) -> ImportPhase {
        ImportPhase::FlowStarts
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

impl FlowStartImporter {
    async fn import_record(
        &self,
        ctx: &ImportContext,
        record: serde_json::Value,
    ) -> Result<Outcome, EngineError> {
        let Some(remote) = decode::<RemoteFlowStart>(ImportPhase::FlowStarts, record) else {
            return Ok(Outcome::Failed);
        };
        let Some(uuid) = parse_uuid(remote.uuid.as_deref()) else {
            tracing::warn!("Skipping flow start without a UUID");
            return Ok(Outcome::Failed);
        };
        let source = uuid.to_string();

        if ctx.lookup(Reference::FlowStart, &source).await?.is_some() {
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
            tracing::warn!(start = %uuid, "Skipping flow start of unimported flow");
            return Ok(Outcome::Skipped);
        };

        let status = remote
            .status
            .as_deref()
            .and_then(FlowStartStatus::from_remote)
            .unwrap_or(FlowStartStatus::Pending);

        let start = FlowStartRepo::create(
            ctx.pool(),
            &CreateFlowStart {
                org_id: ctx.org_id(),
                uuid,
                flow_id,
                status: status.code().to_string(),
                restart_participants: remote.restart_participants.unwrap_or(true),
                // The count of contacts addressed at the source, kept even
                // when some of them fail to resolve locally.
                contact_count: remote.contacts.len() as i32,
                extra: remote.extra.clone(),
                created_by: ctx.initiated_by(),
                created_on: remote.created_on,
            },
        )
        .await?;
        ctx.record_id(Reference::FlowStart, &source, start.id)
            .await?;

        // Contact recipients take priority; groups only apply when no
        // contacts were addressed directly.
        if !remote.contacts.is_empty() {
            for contact_ref in &remote.contacts {
                let Some(contact_uuid) = parse_uuid(contact_ref.uuid.as_deref()) else {
                    continue;
                };
                let Some(contact_id) = ctx
                    .lookup_id(Reference::Contact, &contact_uuid.to_string())
                    .await?
                else {
                    tracing::warn!(start = %uuid, contact = %contact_uuid, "Skipping unimported start contact");
                    continue;
                };
                FlowStartRepo::attach_contact(ctx.pool(), start.id, contact_id).await?;
            }
        } else {
            for group_ref in &remote.groups {
                let Some(group_uuid) = parse_uuid(group_ref.uuid.as_deref()) else {
                    continue;
                };
                let Some(group_id) = ctx
                    .lookup_id(Reference::ContactGroup, &group_uuid.to_string())
                    .await?
                else {
                    tracing::warn!(start = %uuid, group = %group_uuid, "Skipping unimported start group");
                    continue;
                };
                FlowStartRepo::attach_group(ctx.pool(), start.id, group_id).await?;
            }
        }

        Ok(Outcome::Created)
    }
}
