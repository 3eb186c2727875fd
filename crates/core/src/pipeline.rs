//! The ordered import pipeline.
//!
//! Importer phases run strictly in the order of [`ImportPhase::ALL`]; each
//! phase declares which prior phases must have completed before it may run.
//! The orchestrator in `relay-engine` walks this definition rather than
//! encoding the ordering in a call sequence.

use serde::{Deserialize, Serialize};

/// One phase of the migration pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportPhase {
    Contacts,
    Groups,
    Flows,
    Campaigns,
    FlowStarts,
    FlowRuns,
    Broadcasts,
    Messages,
    Labels,
}

impl ImportPhase {
    /// All phases, in execution order. The order is dependency-respecting
    /// and fixed: flows must fully complete before flow runs start, etc.
    pub const ALL: &'static [ImportPhase] = &[
        Self::Contacts,
        Self::Groups,
        Self::Flows,
        Self::Campaigns,
        Self::FlowStarts,
        Self::FlowRuns,
        Self::Broadcasts,
        Self::Messages,
        Self::Labels,
    ];

    /// Phase name for logging and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Groups => "groups",
            Self::Flows => "flows",
            Self::Campaigns => "campaigns",
            Self::FlowStarts => "flow_starts",
            Self::FlowRuns => "flow_runs",
            Self::Broadcasts => "broadcasts",
            Self::Messages => "messages",
            Self::Labels => "labels",
        }
    }

    /// The remote API resource this phase pages through.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Groups => "groups",
            Self::Flows => "flows",
            Self::Campaigns => "campaigns",
            Self::FlowStarts => "flow_starts",
            Self::FlowRuns => "runs",
            Self::Broadcasts => "broadcasts",
            Self::Messages => "messages",
            Self::Labels => "labels",
        }
    }

    /// Phases that must have completed before this one may run.
    ///
    /// Only direct data dependencies are declared; transitive ordering
    /// falls out of the fixed execution order.
    pub fn preconditions(&self) -> &'static [ImportPhase] {
        match self {
            Self::Contacts => &[],
            Self::Groups => &[],
            Self::Flows => &[],
            Self::Campaigns => &[Self::Flows],
            Self::FlowStarts => &[Self::Flows, Self::Contacts],
            Self::FlowRuns => &[Self::Flows, Self::Contacts, Self::FlowStarts],
            Self::Broadcasts => &[Self::Contacts, Self::Groups],
            Self::Messages => &[Self::Contacts, Self::Broadcasts],
            Self::Labels => &[],
        }
    }
}

impl std::fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_has_nine_phases() {
        assert_eq!(ImportPhase::ALL.len(), 9);
    }

    #[test]
    fn pipeline_order_is_fixed() {
        assert_eq!(
            ImportPhase::ALL,
            &[
                ImportPhase::Contacts,
                ImportPhase::Groups,
                ImportPhase::Flows,
                ImportPhase::Campaigns,
                ImportPhase::FlowStarts,
                ImportPhase::FlowRuns,
                ImportPhase::Broadcasts,
                ImportPhase::Messages,
                ImportPhase::Labels,
            ]
        );
    }

    #[test]
    fn preconditions_always_precede_their_phase() {
        for (i, phase) in ImportPhase::ALL.iter().enumerate() {
            for pre in phase.preconditions() {
                let pre_index = ImportPhase::ALL.iter().position(|p| p == pre).unwrap();
                assert!(
                    pre_index < i,
                    "{pre} must run before {phase} but is ordered after it"
                );
            }
        }
    }

    #[test]
    fn flow_runs_depend_on_flows_contacts_and_starts() {
        let pre = ImportPhase::FlowRuns.preconditions();
        assert!(pre.contains(&ImportPhase::Flows));
        assert!(pre.contains(&ImportPhase::Contacts));
        assert!(pre.contains(&ImportPhase::FlowStarts));
    }

    #[test]
    fn runs_phase_uses_runs_resource() {
        assert_eq!(ImportPhase::FlowRuns.resource(), "runs");
        assert_eq!(ImportPhase::FlowRuns.as_str(), "flow_runs");
    }
}
