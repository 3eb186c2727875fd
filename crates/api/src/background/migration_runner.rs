//! Runs a submitted migration to completion in the background.
//!
//! One task per submission. The engine's ledger makes re-submission after a
//! crash or fatal error safe, so there is no retry loop here: failures are
//! logged and the task ends.

use relay_core::types::DbId;
use relay_db::DbPool;

/// Spawn the import run for a freshly created migration row.
pub fn spawn(pool: DbPool, migration_id: DbId) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        run(pool, migration_id).await;
    })
}

async fn run(pool: DbPool, migration_id: DbId) {
    tracing::info!(migration_id, "Migration runner started");

    match relay_engine::run_migration(&pool, migration_id).await {
        Ok(report) => {
            tracing::info!(
                migration_id,
                created = report.total_created(),
                skipped = report.total_skipped(),
                failed = report.total_failed(),
                "Migration runner finished"
            );
        }
        Err(error) => {
            tracing::error!(migration_id, error = %error, "Migration runner aborted");
        }
    }
}
