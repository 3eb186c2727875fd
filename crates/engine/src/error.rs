use relay_core::types::DbId;
use relay_remote::RemoteApiError;

/// Errors that abort a migration run.
///
/// Per-record problems never become an `EngineError`; they are logged and
/// counted in the phase report instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The remote API failed mid-phase (network, auth, decode).
    #[error("Remote API failure: {0}")]
    Remote(#[from] RemoteApiError),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The migration row the run was started for does not exist.
    #[error("Migration {0} not found")]
    MigrationNotFound(DbId),
}
