//! Remote-string to local-code mappings.
//!
//! The remote API reports enumerated fields as lowercase words; the local
//! schema stores the platform's single-letter codes. Every mapping here is
//! total over the remote vocabulary and returns `None` for anything else so
//! callers decide whether an unknown value is a skip or a fallback.

use serde::{Deserialize, Serialize};

/// Campaign event scheduling unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl EventUnit {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Minutes => "M",
            Self::Hours => "H",
            Self::Days => "D",
            Self::Weeks => "W",
        }
    }

    pub fn from_remote(s: &str) -> Option<Self> {
        match s {
            "minutes" => Some(Self::Minutes),
            "hours" => Some(Self::Hours),
            "days" => Some(Self::Days),
            "weeks" => Some(Self::Weeks),
            _ => None,
        }
    }
}

/// Campaign event type: triggers a flow or sends a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Flow,
    Message,
}

impl EventType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Flow => "F",
            Self::Message => "M",
        }
    }
}

/// Flow start lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStartStatus {
    Pending,
    Starting,
    Complete,
    Failed,
}

impl FlowStartStatus {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pending => "P",
            Self::Starting => "S",
            Self::Complete => "C",
            Self::Failed => "F",
        }
    }

    pub fn from_remote(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "starting" => Some(Self::Starting),
            "complete" => Some(Self::Complete),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// How a flow run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunExitType {
    Completed,
    Interrupted,
    Expired,
}

impl RunExitType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Completed => "C",
            Self::Interrupted => "I",
            Self::Expired => "E",
        }
    }

    pub fn from_remote(s: &str) -> Option<Self> {
        match s {
            "completed" => Some(Self::Completed),
            "interrupted" => Some(Self::Interrupted),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

/// Message delivery status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgStatus {
    Initializing,
    Pending,
    Queued,
    Wired,
    Sent,
    Delivered,
    Handled,
    Errored,
    Failed,
    Resent,
}

impl MsgStatus {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Initializing => "I",
            Self::Pending => "P",
            Self::Queued => "Q",
            Self::Wired => "W",
            Self::Sent => "S",
            Self::Delivered => "D",
            Self::Handled => "H",
            Self::Errored => "E",
            Self::Failed => "F",
            Self::Resent => "R",
        }
    }

    pub fn from_remote(s: &str) -> Option<Self> {
        match s {
            "initializing" => Some(Self::Initializing),
            "pending" => Some(Self::Pending),
            "queued" => Some(Self::Queued),
            "wired" => Some(Self::Wired),
            "sent" => Some(Self::Sent),
            "delivered" => Some(Self::Delivered),
            "handled" => Some(Self::Handled),
            "errored" => Some(Self::Errored),
            "failed" => Some(Self::Failed),
            "resent" => Some(Self::Resent),
            _ => None,
        }
    }
}

/// Message visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgVisibility {
    Visible,
    Archived,
    Deleted,
}

impl MsgVisibility {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Visible => "V",
            Self::Archived => "A",
            Self::Deleted => "D",
        }
    }

    pub fn from_remote(s: &str) -> Option<Self> {
        match s {
            "visible" => Some(Self::Visible),
            "archived" => Some(Self::Archived),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }
}

/// Message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgType {
    Inbox,
    Flow,
    Ivr,
    Ussd,
}

impl MsgType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Inbox => "I",
            Self::Flow => "F",
            Self::Ivr => "V",
            Self::Ussd => "U",
        }
    }

    pub fn from_remote(s: &str) -> Option<Self> {
        match s {
            "inbox" => Some(Self::Inbox),
            "flow" => Some(Self::Flow),
            "ivr" => Some(Self::Ivr),
            "ussd" => Some(Self::Ussd),
            _ => None,
        }
    }
}

/// Message direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgDirection {
    Incoming,
    Outgoing,
}

impl MsgDirection {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Incoming => "I",
            Self::Outgoing => "O",
        }
    }

    pub fn from_remote(s: &str) -> Option<Self> {
        match s {
            "in" => Some(Self::Incoming),
            "out" => Some(Self::Outgoing),
            _ => None,
        }
    }
}

/// Which node kind a flow starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEntryType {
    Rules,
    Actions,
}

impl FlowEntryType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Rules => "R",
            Self::Actions => "A",
        }
    }
}

/// Flow type code for flows synthesized from single-message campaign events.
pub const FLOW_TYPE_MESSAGE: &str = "M";

/// Resolve the status to store for a migrated message.
///
/// Incoming messages are always stored as handled regardless of the remote
/// status; outgoing messages fall back to sent when the remote status is
/// unrecognised or absent.
pub fn resolve_msg_status(direction: MsgDirection, remote_status: Option<&str>) -> MsgStatus {
    match direction {
        MsgDirection::Incoming => MsgStatus::Handled,
        MsgDirection::Outgoing => remote_status
            .and_then(MsgStatus::from_remote)
            .unwrap_or(MsgStatus::Sent),
    }
}
