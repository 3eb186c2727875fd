//! Message label importer.
//!
//! Labels also get created on sight during the messages phase; this final
//! phase picks up the ones no imported message referenced.

use async_trait::async_trait;

use relay_core::pipeline::ImportPhase;
use relay_core::reference::Reference;
use relay_db::repositories::LabelRepo;
use relay_remote::resources::RemoteLabel;

use crate::context::ImportContext;
use crate::error::EngineError;
use crate::importers::{decode, parse_uuid, Importer, Outcome};
use crate::report::PhaseReport;

pub struct LabelImporter;

#[async_trait]
impl Importer for LabelImporter {
    fn phase(&self) -> ImportPhase {
        ImportPhase::Labels
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

impl LabelImporter {
    async fn import_record(
        &self,
        ctx: &ImportContext,
        record: serde_json::Value,
    ) -> Result<Outcome, EngineError> {
        let Some(remote) = decode::<RemoteLabel>(ImportPhase::Labels, record) else {
            return Ok(Outcome::Failed);
        };
        let Some(uuid) = parse_uuid(remote.uuid.as_deref()) else {
            tracing::warn!("Skipping label without a UUID");
            return Ok(Outcome::Failed);
        };
        let source = uuid.to_string();

        if ctx.lookup(Reference::MsgLabel, &source).await?.is_some() {
            return Ok(Outcome::Skipped);
        }

        if let Some(existing) = LabelRepo::find_by_uuid(ctx.pool(), ctx.org_id(), uuid).await? {
            ctx.record_id(Reference::MsgLabel, &source, existing.id)
                .await?;
            return Ok(Outcome::Skipped);
        }

        let Some(name) = remote.name.as_deref().filter(|n| !n.is_empty()) else {
            tracing::warn!(label = %uuid, "Skipping label without a name");
            return Ok(Outcome::Failed);
        };

        let label = LabelRepo::create(ctx.pool(), ctx.org_id(), uuid, name).await?;
        ctx.record_id(Reference::MsgLabel, &source, label.id).await?;
        Ok(Outcome::Created)
    }
}
