//! Ledger reference kinds.
//!
//! Every row in `migration_associations` is tagged with the kind of entity
//! it maps, so lookups are always exact on (migration, kind, source value).

use serde::{Deserialize, Serialize};

/// The entity kind a ledger entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reference {
    Contact,
    ContactGroup,
    Flow,
    FlowStart,
    FlowRun,
    Campaign,
    Msg,
    MsgLabel,
    MsgBroadcast,
}

impl Reference {
    /// Return the reference name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::ContactGroup => "contact_group",
            Self::Flow => "flow",
            Self::FlowStart => "flow_start",
            Self::FlowRun => "flow_run",
            Self::Campaign => "campaign",
            Self::Msg => "msg",
            Self::MsgLabel => "msg_label",
            Self::MsgBroadcast => "msg_broadcast",
        }
    }

    /// Parse a reference string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "contact" => Some(Self::Contact),
            "contact_group" => Some(Self::ContactGroup),
            "flow" => Some(Self::Flow),
            "flow_start" => Some(Self::FlowStart),
            "flow_run" => Some(Self::FlowRun),
            "campaign" => Some(Self::Campaign),
            "msg" => Some(Self::Msg),
            "msg_label" => Some(Self::MsgLabel),
            "msg_broadcast" => Some(Self::MsgBroadcast),
            _ => None,
        }
    }

    /// All valid reference values.
    pub const ALL: &'static [&'static str] = &[
        "contact",
        "contact_group",
        "flow",
        "flow_start",
        "flow_run",
        "campaign",
        "msg",
        "msg_label",
        "msg_broadcast",
    ];
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_round_trip() {
        for s in Reference::ALL {
            let reference = Reference::parse(s).unwrap();
            assert_eq!(reference.as_str(), *s);
        }
    }

    #[test]
    fn reference_unknown_returns_none() {
        assert!(Reference::parse("channel").is_none());
        assert!(Reference::parse("").is_none());
    }

    #[test]
    fn reference_display_matches_as_str() {
        assert_eq!(format!("{}", Reference::MsgBroadcast), "msg_broadcast");
    }

    #[test]
    fn reference_all_has_nine_entries() {
        assert_eq!(Reference::ALL.len(), 9);
    }
}
