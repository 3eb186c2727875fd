//! Contact importer: the contact row, its URNs, group memberships, and
//! custom field values.

use async_trait::async_trait;

use relay_core::pipeline::ImportPhase;
use relay_core::reference::Reference;
use relay_core::urns::parse_urn;
use relay_core::values::classify_value;
use relay_db::models::contact::{Contact, CreateContact};
use relay_db::repositories::{
    ContactFieldValueRepo, ContactGroupRepo, ContactRepo, ContactUrnRepo,
};
use relay_remote::resources::RemoteContact;

use crate::context::ImportContext;
use crate::error::EngineError;
use crate::importers::{decode, groups, json_text, parse_uuid, Importer, Outcome};
use crate::report::PhaseReport;

pub struct ContactImporter;

#[async_trait]
impl Importer for ContactImporter {
    fn phase(&self) -> ImportPhase {
        ImportPhase::Contacts
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

impl ContactImporter {
    async fn import_record(
        &self,
        ctx: &ImportContext,
        record: serde_json::Value,
    ) -> Result<Outcome, EngineError> {
        let Some(remote) = decode::<RemoteContact>(ImportPhase::Contacts, record) else {
            return Ok(Outcome::Failed);
        };
        let Some(uuid) = parse_uuid(remote.uuid.as_deref()) else {
            tracing::warn!("Skipping contact without a UUID");
            return Ok(Outcome::Failed);
        };
        let source = uuid.to_string();

        if ctx.lookup(Reference::Contact, &source).await?.is_some() {
            return Ok(Outcome::Skipped);
        }

        // A contact with the same UUID may already exist in this org, e.g.
        // from an earlier migration of a related instance. Reuse it rather
        // than duplicating the identity.
        let (contact, created) =
            match ContactRepo::find_by_uuid(ctx.pool(), ctx.org_id(), uuid).await? {
                Some(existing) => (existing, false),
                None => {
                    let contact = ContactRepo::create(
                        ctx.pool(),
                        &CreateContact {
                            org_id: ctx.org_id(),
                            uuid,
                            name: remote.name.clone(),
                            language: remote.language.clone(),
                            is_blocked: remote.blocked.unwrap_or(false),
                            is_stopped: remote.stopped.unwrap_or(false),
                            created_by: ctx.initiated_by(),
                            created_on: remote.created_on,
                            modified_on: remote.modified_on,
                        },
                    )
                    .await?;
                    (contact, true)
                }
            };
        ctx.record_id(Reference::Contact, &source, contact.id)
            .await?;

        self.attach_urns(ctx, &contact, &remote).await?;
        self.attach_groups(ctx, &contact, &remote).await?;
        self.store_fields(ctx, &contact, &remote).await?;

        Ok(if created {
            Outcome::Created
        } else {
            Outcome::Skipped
        })
    }

    async fn attach_urns(
        &self,
        ctx: &ImportContext,
        contact: &Contact,
        remote: &RemoteContact,
    ) -> Result<(), EngineError> {
        for identity in &remote.urns {
            let parts = match parse_urn(identity) {
                Ok(parts) => parts,
                Err(error) => {
                    tracing::warn!(contact = %contact.uuid, %error, "Skipping unparseable URN");
                    continue;
                }
            };

            // A URN follows the imported contact, even away from a previous
            // owner; the source is authoritative for who holds the identity.
            match ContactUrnRepo::find_by_identity(
                ctx.pool(),
                ctx.org_id(),
                &parts.scheme,
                &parts.path,
            )
            .await?
            {
                Some(existing) => {
                    ContactUrnRepo::assign_contact(ctx.pool(), existing.id, contact.id).await?;
                }
                None => {
                    ContactUrnRepo::create(
                        ctx.pool(),
                        ctx.org_id(),
                        contact.id,
                        &parts.scheme,
                        &parts.path,
                        parts.display.as_deref(),
                    )
                    .await?;
                }
            }
        }
        Ok(())
    }

    async fn attach_groups(
        &self,
        ctx: &ImportContext,
        contact: &Contact,
        remote: &RemoteContact,
    ) -> Result<(), EngineError> {
        // Blocked and stopped contacts keep no group memberships.
        if contact.is_blocked || contact.is_stopped {
            return Ok(());
        }

        for group_ref in &remote.groups {
            let Some(group_uuid) = parse_uuid(group_ref.uuid.as_deref()) else {
                continue;
            };
            let Some(group_id) =
                groups::resolve_or_create_group(ctx, group_uuid, group_ref.name.as_deref()).await?
            else {
                tracing::warn!(contact = %contact.uuid, group = %group_uuid, "Skipping unresolvable group membership");
                continue;
            };
            ContactGroupRepo::add_member(ctx.pool(), group_id, contact.id).await?;
        }
        Ok(())
    }

    async fn store_fields(
        &self,
        ctx: &ImportContext,
        contact: &Contact,
        remote: &RemoteContact,
    ) -> Result<(), EngineError> {
        for (key, value) in &remote.fields {
            let Some(raw) = json_text(value) else {
                continue;
            };
            let classified = classify_value(&raw);
            ContactFieldValueRepo::upsert(
                ctx.pool(),
                ctx.org_id(),
                contact.id,
                key,
                Some(&classified.string_value),
                classified.decimal_value,
                classified.datetime_value,
                classified.media_value.as_deref(),
            )
            .await?;
        }
        Ok(())
    }
}
