//! The nine entity importers.
//!
//! Each importer pages through one remote resource and imports records one
//! at a time. Record-level problems are logged and counted; only transport
//! and database failures propagate.

use async_trait::async_trait;
use uuid::Uuid;

use relay_core::pipeline::ImportPhase;

use crate::context::ImportContext;
use crate::error::EngineError;
use crate::report::PhaseReport;

pub mod broadcasts;
pub mod campaigns;
pub mod contacts;
pub mod flow_runs;
pub mod flow_starts;
pub mod flows;
pub mod groups;
pub mod labels;
pub mod messages;

/// One phase of the import pipeline.
#[async_trait]
pub trait Importer: Send + Sync {
    /// The phase this importer implements.
    fn phase(&self) -> ImportPhase;

    /// Page through the phase's resource and import every record.
    async fn run(&self, ctx: &ImportContext) -> Result<PhaseReport, EngineError>;
}

/// All importers, in pipeline execution order.
pub fn all() -> Vec<Box<dyn Importer>> {
    vec![
        Box::new(contacts::ContactImporter),
        Box::new(groups::GroupImporter),
        Box::new(flows::FlowImporter),
        Box::new(campaigns::CampaignImporter),
        Box::new(flow_starts::FlowStartImporter),
        Box::new(flow_runs::FlowRunImporter),
        Box::new(broadcasts::BroadcastImporter),
        Box::new(messages::MessageImporter),
        Box::new(labels::LabelImporter),
    ]
}

/// How one record ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Created,
    Skipped,
    Failed,
}

impl Outcome {
    pub(crate) fn tally(self, report: &mut PhaseReport) {
        match self {
            Self::Created => report.created += 1,
            Self::Skipped => report.skipped += 1,
            Self::Failed => report.failed += 1,
        }
    }
}

/// Decode one raw record into its transfer type. Decode failures are a
/// per-record problem, not a phase abort.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    phase: ImportPhase,
    record: serde_json::Value,
) -> Option<T> {
    match serde_json::from_value(record) {
        Ok(decoded) => Some(decoded),
        Err(error) => {
            tracing::warn!(phase = %phase, %error, "Skipping undecodable record");
            None
        }
    }
}

/// Parse a remote UUID string, tolerating absence.
pub(crate) fn parse_uuid(value: Option<&str>) -> Option<Uuid> {
    value.and_then(|s| Uuid::parse_str(s).ok())
}

/// A JSON scalar as the text the platform stores: strings verbatim, other
/// scalars via their JSON spelling, null as absent.
pub(crate) fn json_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::pipeline::ImportPhase;

    #[test]
    fn importers_match_pipeline_order() {
        let phases: Vec<ImportPhase> = all().iter().map(|i| i.phase()).collect();
        assert_eq!(phases.as_slice(), ImportPhase::ALL);
    }

    #[test]
    fn decode_rejects_shape_mismatch() {
        let record = serde_json::json!({"id": "not-a-number"});
        let decoded: Option<relay_remote::resources::RemoteRun> =
            decode(ImportPhase::FlowRuns, record);
        assert!(decoded.is_none());
    }

    #[test]
    fn parse_uuid_tolerates_garbage() {
        assert!(parse_uuid(Some("6fd32c5d-6a37-4b26-8e5a-9e5e1e3f1a11")).is_some());
        assert!(parse_uuid(Some("nope")).is_none());
        assert!(parse_uuid(None).is_none());
    }

    #[test]
    fn json_text_stringifies_scalars() {
        assert_eq!(json_text(&serde_json::json!("abc")).as_deref(), Some("abc"));
        assert_eq!(json_text(&serde_json::json!(7)).as_deref(), Some("7"));
        assert_eq!(json_text(&serde_json::json!(null)), None);
    }
}
