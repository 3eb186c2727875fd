//! Walks the import pipeline for one migration run.

use relay_core::pipeline::ImportPhase;
use relay_core::types::DbId;
use relay_db::repositories::MigrationRepo;
use relay_db::DbPool;

use crate::context::ImportContext;
use crate::error::EngineError;
use crate::importers;
use crate::report::MigrationReport;

/// Run every import phase for a migration, in pipeline order.
///
/// Safe to re-invoke: the ledger makes every phase skip what a previous
/// run already imported. A remote or database failure aborts the run with
/// all prior work committed.
pub async fn run_migration(pool: &DbPool, migration_id: DbId) -> Result<MigrationReport, EngineError> {
    let migration = MigrationRepo::find_by_id(pool, migration_id)
        .await?
        .ok_or(EngineError::MigrationNotFound(migration_id))?;

    tracing::info!(
        migration_id,
        org_id = migration.org_id,
        api_host = %migration.api_host,
        "Starting migration run"
    );

    let ctx = ImportContext::new(pool.clone(), migration);
    let mut report = MigrationReport::default();
    let mut completed: Vec<ImportPhase> = Vec::new();

    for importer in importers::all() {
        let phase = importer.phase();
        debug_assert!(
            phase.preconditions().iter().all(|p| completed.contains(p)),
            "phase {phase} ran before its preconditions"
        );

        tracing::info!(migration_id, phase = %phase, "Phase starting");
        let phase_report = importer.run(&ctx).await?;
        tracing::info!(
            migration_id,
            phase = %phase,
            created = phase_report.created,
            skipped = phase_report.skipped,
            failed = phase_report.failed,
            "Phase complete"
        );

        completed.push(phase);
        report.phases.push(phase_report);
    }

    tracing::info!(
        migration_id,
        created = report.total_created(),
        skipped = report.total_skipped(),
        failed = report.total_failed(),
        "Migration run complete"
    );
    Ok(report)
}
