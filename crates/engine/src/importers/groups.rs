//! Contact group importer.

use async_trait::async_trait;
use uuid::Uuid;

use relay_core::pipeline::ImportPhase;
use relay_core::reference::Reference;
use relay_core::types::DbId;
use relay_db::models::group::CreateContactGroup;
use relay_db::repositories::ContactGroupRepo;
use relay_remote::resources::RemoteGroup;

use crate::context::ImportContext;
use crate::error::EngineError;
use crate::importers::{decode, parse_uuid, Importer, Outcome};
use crate::report::PhaseReport;

pub struct GroupImporter;

#[async_trait]
impl Importer for GroupImporter {
    fn phase(&self) -> ImportPhase {
        ImportPhase::Groups
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

impl GroupImporter {
    async fn import_record(
        &self,
        ctx: &ImportContext,
        record: serde_json::Value,
    ) -> Result<Outcome, EngineError> {
        let Some(remote) = decode::<RemoteGroup>(ImportPhase::Groups, record) else {
            return Ok(Outcome::Failed);
        };
        let Some(uuid) = parse_uuid(remote.uuid.as_deref()) else {
            tracing::warn!("Skipping group without a UUID");
            return Ok(Outcome::Failed);
        };
        let source = uuid.to_string();

        if ctx.lookup(Reference::ContactGroup, &source).await?.is_some() {
            return Ok(Outcome::Skipped);
        }

        if let Some(existing) = ContactGroupRepo::find_by_uuid(ctx.pool(), ctx.org_id(), uuid).await?
        {
            ctx.record_id(Reference::ContactGroup, &source, existing.id)
                .await?;
            return Ok(Outcome::Skipped);
        }

        let Some(name) = remote.name.as_deref().filter(|n| !n.is_empty()) else {
            tracing::warn!(group = %uuid, "Skipping group without a name");
            return Ok(Outcome::Failed);
        };

        let group = ContactGroupRepo::create(
            ctx.pool(),
            &CreateContactGroup {
                org_id: ctx.org_id(),
                uuid,
                name: name.to_string(),
                query: remote.query.clone(),
                created_by: ctx.initiated_by(),
            },
        )
        .await?;
        ctx.record_id(Reference::ContactGroup, &source, group.id)
            .await?;
        Ok(Outcome::Created)
    }
}

/// Resolve a referenced group to a local ID, creating it on first sight.
///
/// Used wherever a group appears as a dependency (contact memberships,
/// campaign target groups) before or after the groups phase proper.
pub(crate) async fn resolve_or_create_group(
    ctx: &ImportContext,
    uuid: Uuid,
    name: Option<&str>,
) -> Result<Option<DbId>, EngineError> {
    let source = uuid.to_string();

    if let Some(id) = ctx.lookup_id(Reference::ContactGroup, &source).await? {
        return Ok(Some(id));
    }

    if let Some(existing) = ContactGroupRepo::find_by_uuid(ctx.pool(), ctx.org_id(), uuid).await? {
        ctx.record_id(Reference::ContactGroup, &source, existing.id)
            .await?;
        return Ok(Some(existing.id));
    }

    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return Ok(None);
    };

    let group = ContactGroupRepo::create(
        ctx.pool(),
        &CreateContactGroup {
            org_id: ctx.org_id(),
            uuid,
            name: name.to_string(),
            query: None,
            created_by: ctx.initiated_by(),
        },
    )
    .await?;
    ctx.record_id(Reference::ContactGroup, &source, group.id)
        .await?;
    Ok(Some(group.id))
}
