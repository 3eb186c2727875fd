//! Broadcast importer.
//!
//! Like runs, broadcasts are ledger-keyed by their remote numeric id.

use async_trait::async_trait;

use relay_core::choices::MsgStatus;
use relay_core::pipeline::ImportPhase;
use relay_core::reference::Reference;
use relay_core::types::DbId;
use relay_core::urns::parse_urn;
use relay_db::models::broadcast::CreateBroadcast;
use relay_db::repositories::{BroadcastRepo, ContactUrnRepo};
use relay_remote::resources::RemoteBroadcast;

use crate::context::ImportContext;
use crate::error::EngineError;
use crate::importers::{decode, parse_uuid, Importer, Outcome};
use crate::report::PhaseReport;

pub struct BroadcastImporter;

#[async_trait]
impl Importer for BroadcastImporter {
    fn phase(&self) -> ImportPhase {
        ImportPhase::Broadcasts
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

impl BroadcastImporter {
    async fn import_record(
        &self,
        ctx: &ImportContext,
        record: serde_json::Value,
    ) -> Result<Outcome, EngineError> {
        let Some(remote) = decode::<RemoteBroadcast>(ImportPhase::Broadcasts, record) else {
            return Ok(Outcome::Failed);
        };
        let Some(remote_id) = remote.id else {
            tracing::warn!("Skipping broadcast without an id");
            return Ok(Outcome::Failed);
        };
        let source = remote_id.to_string();

        if ctx.lookup(Reference::MsgBroadcast, &source).await?.is_some() {
            return Ok(Outcome::Skipped);
        }

        let Some(text) = remote.text_value() else {
            tracing::warn!(broadcast = remote_id, "Skipping broadcast without text");
            return Ok(Outcome::Failed);
        };

        // Resolve contact targets up front: the recipient count stored on
        // the broadcast is the count of contacts that resolved, not the
        // remote's own count.
        let mut contact_ids: Vec<DbId> = Vec::new();
        for contact_ref in &remote.contacts {
            let Some(contact_uuid) = parse_uuid(contact_ref.uuid.as_deref()) else {
                continue;
            };
            match ctx
                .lookup_id(Reference::Contact, &contact_uuid.to_string())
                .await?
            {
                Some(contact_id) => contact_ids.push(contact_id),
                None => {
                    tracing::warn!(broadcast = remote_id, contact = %contact_uuid, "Skipping unimported broadcast contact");
                }
            }
        }

        let broadcast = BroadcastRepo::create(
            ctx.pool(),
            &CreateBroadcast {
                org_id: ctx.org_id(),
                text,
                // Imported broadcasts are historical sends.
                status: MsgStatus::Sent.code().to_string(),
                recipient_count: contact_ids.len() as i32,
                created_by: ctx.initiated_by(),
                created_on: remote.created_on,
            },
        )
        .await?;
        ctx.record_id(Reference::MsgBroadcast, &source, broadcast.id)
            .await?;

        for contact_id in &contact_ids {
            BroadcastRepo::attach_contact(ctx.pool(), broadcast.id, *contact_id).await?;
            BroadcastRepo::add_recipient(ctx.pool(), broadcast.id, *contact_id).await?;
        }

        for group_ref in &remote.groups {
            let Some(group_uuid) = parse_uuid(group_ref.uuid.as_deref()) else {
                continue;
            };
            let Some(group_id) = ctx
                .lookup_id(Reference::ContactGroup, &group_uuid.to_string())
                .await?
            else {
                tracing::warn!(broadcast = remote_id, group = %group_uuid, "Skipping unimported broadcast group");
                continue;
            };
            BroadcastRepo::attach_group(ctx.pool(), broadcast.id, group_id).await?;
        }

        for identity in &remote.urns {
            let parts = match parse_urn(identity) {
                Ok(parts) => parts,
                Err(error) => {
                    tracing::warn!(broadcast = remote_id, %error, "Skipping unparseable broadcast URN");
                    continue;
                }
            };
            let Some(urn) = ContactUrnRepo::find_by_identity(
                ctx.pool(),
                ctx.org_id(),
                &parts.scheme,
                &parts.path,
            )
            .await?
            else {
                tracing::warn!(broadcast = remote_id, urn = %identity, "Skipping unknown broadcast URN");
                continue;
            };
            BroadcastRepo::attach_urn(ctx.pool(), broadcast.id, urn.id).await?;
        }

        Ok(Outcome::Created)
    }
}
