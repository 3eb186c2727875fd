//! The migration engine: nine entity importers walked in a fixed,
//! dependency-respecting order against one remote instance.
//!
//! Everything here is best-effort per record: a record that cannot be
//! imported is logged and skipped, while transport and database failures
//! abort the run. Because every created entity is recorded in the
//! association ledger before the next record is touched, re-running a
//! partially completed migration resumes where it left off.

pub mod context;
pub mod error;
pub mod importers;
pub mod orchestrator;
pub mod report;

pub use context::ImportContext;
pub use error::EngineError;
pub use orchestrator::run_migration;
pub use report::{MigrationReport, PhaseReport};
