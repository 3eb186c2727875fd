//! Message importer.
//!
//! The messages resource partitions results into server-side folders, so
//! this phase pages through each folder in turn. The ledger gate is global
//! across folders: a message that appears in more than one folder is
//! imported once.

use async_trait::async_trait;

use relay_core::choices::{resolve_msg_status, MsgDirection, MsgType, MsgVisibility};
use relay_core::pipeline::ImportPhase;
use relay_core::reference::Reference;
use relay_core::types::DbId;
use relay_core::urns::parse_urn;
use relay_db::models::msg::CreateMsg;
use relay_db::repositories::{ContactUrnRepo, LabelRepo, MsgRepo};
use relay_remote::resources::RemoteMessage;
use relay_remote::MSG_FOLDERS;

use crate::context::ImportContext;
use crate::error::EngineError;
use crate::importers::{decode, parse_uuid, Importer, Outcome};
use crate::report::PhaseReport;

pub struct MessageImporter;

#[async_trait]
impl Importer for MessageImporter {
    fn phase(&self) -> ImportPhase {
        ImportPhase::Messages
    }

    async fn run(&self, ctx: &ImportContext) -> Result<PhaseReport, EngineError> {
        let mut report = PhaseReport::new(self.phase());

        for folder in MSG_FOLDERS {
            let url = format!(
                "{}?folder={folder}",
                ctx.client().request_url(self.phase().resource())
            );
            tracing::info!(folder, "Importing message folder");

            let mut pages = ctx.client().fetch_all(url);
            while let Some(records) = pages.next().await? {
                for record in records {
                    self.import_record(ctx, record).await?.tally(&mut report);
                }
            }
        }
        Ok(report)
    }
}

impl MessageImporter {
    async fn import_record(
        &self,
        ctx: &ImportContext,
        record: serde_json::Value,
    ) -> Result<Outcome, EngineError> {
        let Some(remote) = decode::<RemoteMessage>(ImportPhase::Messages, record) else {
            return Ok(Outcome::Failed);
        };
        let Some(remote_id) = remote.id else {
            tracing::warn!("Skipping message without an id");
            return Ok(Outcome::Failed);
        };
        let source = remote_id.to_string();

        if ctx.lookup(Reference::Msg, &source).await?.is_some() {
            return Ok(Outcome::Skipped);
        }

        let contact_uuid = parse_uuid(remote.contact.as_ref().and_then(|c| c.uuid.as_deref()));
        let contact_id = match contact_uuid {
            Some(contact_uuid) => {
                ctx.lookup_id(Reference::Contact, &contact_uuid.to_string())
                    .await?
            }
            None => None,
        };
        let Some(contact_id) = contact_id else {
            tracing::warn!(msg = remote_id, "Skipping message of unimported contact");
            return Ok(Outcome::Skipped);
        };

        // The channel must be mapped by the migration's channel map and
        // exist locally; unmapped channels skip the message.
        let Some(channel_uuid) = remote.channel.as_ref().and_then(|c| c.uuid.as_deref()) else {
            tracing::warn!(msg = remote_id, "Skipping message without a channel");
            return Ok(Outcome::Skipped);
        };
        let Some(channel) = ctx.resolve_channel(channel_uuid).await? else {
            tracing::warn!(msg = remote_id, channel = channel_uuid, "Skipping message with unmapped channel");
            return Ok(Outcome::Skipped);
        };

        let Some(urn_id) = self.resolve_urn(ctx, &remote).await? else {
            tracing::warn!(msg = remote_id, "Skipping message without a resolvable URN");
            return Ok(Outcome::Skipped);
        };

        let Some(direction) = remote.direction.as_deref().and_then(MsgDirection::from_remote)
        else {
            tracing::warn!(msg = remote_id, direction = ?remote.direction, "Skipping message with unknown direction");
            return Ok(Outcome::Failed);
        };
        let status = resolve_msg_status(direction, remote.status.as_deref());

        // The archived folder flag wins over the reported visibility.
        let visibility = if remote.archived.unwrap_or(false) {
            MsgVisibility::Archived
        } else {
            remote
                .visibility
                .as_deref()
                .and_then(MsgVisibility::from_remote)
                .unwrap_or(MsgVisibility::Visible)
        };

        let msg_type = remote
            .msg_type
            .as_deref()
            .and_then(MsgType::from_remote)
            .map(|t| t.code().to_string());

        let broadcast_id = match remote.broadcast {
            Some(remote_broadcast_id) => {
                ctx.lookup_id(Reference::MsgBroadcast, &remote_broadcast_id.to_string())
                    .await?
            }
            None => None,
        };

        let attachments = remote
            .media
            .as_ref()
            .map(|media| serde_json::json!([media]));

        let msg = MsgRepo::create(
            ctx.pool(),
            &CreateMsg {
                org_id: ctx.org_id(),
                broadcast_id,
                contact_id,
                contact_urn_id: urn_id,
                channel_id: channel.id,
                direction: direction.code().to_string(),
                msg_type,
                status: status.code().to_string(),
                visibility: visibility.code().to_string(),
                text: remote.text.clone().unwrap_or_default(),
                attachments,
                created_on: remote.created_on,
                modified_on: remote.modified_on,
                sent_on: None,
            },
        )
        .await?;
        ctx.record_id(Reference::Msg, &source, msg.id).await?;

        self.attach_labels(ctx, msg.id, &remote).await?;
        Ok(Outcome::Created)
    }

    async fn resolve_urn(
        &self,
        ctx: &ImportContext,
        remote: &RemoteMessage,
    ) -> Result<Option<DbId>, EngineError> {
        let Some(identity) = remote.urn.as_deref() else {
            return Ok(None);
        };
        let parts = match parse_urn(identity) {
            Ok(parts) => parts,
            Err(error) => {
                tracing::warn!(%error, "Unparseable message URN");
                return Ok(None);
            }
        };
        let urn =
            ContactUrnRepo::find_by_identity(ctx.pool(), ctx.org_id(), &parts.scheme, &parts.path)
                .await?;
        Ok(urn.map(|u| u.id))
    }

    async fn attach_labels(
        &self,
        ctx: &ImportContext,
        msg_id: DbId,
        remote: &RemoteMessage,
    ) -> Result<(), EngineError> {
        for label_ref in &remote.labels {
            let Some(uuid) = parse_uuid(label_ref.uuid.as_deref()) else {
                continue;
            };
            let source = uuid.to_string();

            let label_id = match ctx.lookup_id(Reference::MsgLabel, &source).await? {
                Some(id) => id,
                None => {
                    match LabelRepo::find_by_uuid(ctx.pool(), ctx.org_id(), uuid).await? {
                        Some(existing) => {
                            ctx.record_id(Reference::MsgLabel, &source, existing.id)
                                .await?;
                            existing.id
                        }
                        None => {
                            let Some(name) =
                                label_ref.name.as_deref().filter(|n| !n.is_empty())
                            else {
                                continue;
                            };
                            let label =
                                LabelRepo::create(ctx.pool(), ctx.org_id(), uuid, name).await?;
                            ctx.record_id(Reference::MsgLabel, &source, label.id).await?;
                            label.id
                        }
                    }
                }
            };
            LabelRepo::link_msg(ctx.pool(), msg_id, label_id).await?;
        }
        Ok(())
    }
}
