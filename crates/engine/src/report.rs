//! Per-phase and per-run import counters.

use serde::Serialize;

use relay_core::pipeline::ImportPhase;

/// Counters for one completed phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseReport {
    pub phase: ImportPhase,
    /// Entities created locally.
    pub created: u64,
    /// Records skipped: already imported, or an unresolvable dependency.
    pub skipped: u64,
    /// Records that could not be decoded or transformed.
    pub failed: u64,
}

impl PhaseReport {
    pub fn new(phase: ImportPhase) -> Self {
        Self {
            phase,
            created: 0,
            skipped: 0,
            failed: 0,
        }
    }

    /// Records seen in total.
    pub fn total(&self) -> u64 {
        self.created + self.skipped + self.failed
    }
}

/// Aggregated counters for a whole run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    pub phases: Vec<PhaseReport>,
}

impl MigrationReport {
    pub fn total_created(&self) -> u64 {
        self.phases.iter().map(|p| p.created).sum()
    }

    pub fn total_skipped(&self) -> u64 {
        self.phases.iter().map(|p| p.skipped).sum()
    }

    pub fn total_failed(&self) -> u64 {
        self.phases.iter().map(|p| p.failed).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_report_totals() {
        let mut report = PhaseReport::new(ImportPhase::Contacts);
        report.created = 5;
        report.skipped = 2;
        report.failed = 1;
        assert_eq!(report.total(), 8);
    }

    #[test]
    fn migration_report_sums_phases() {
        let mut a = PhaseReport::new(ImportPhase::Contacts);
        a.created = 3;
        let mut b = PhaseReport::new(ImportPhase::Groups);
        b.created = 2;
        b.skipped = 4;

        let report = MigrationReport {
            phases: vec![a, b],
        };
        assert_eq!(report.total_created(), 5);
        assert_eq!(report.total_skipped(), 4);
        assert_eq!(report.total_failed(), 0);
    }
}
