//! Client for the remote messaging platform's paginated REST API.
//!
//! Wraps the versioned JSON HTTP API (cursor-paginated via a `next` field)
//! using [`reqwest`], and defines one typed transfer object per entity kind
//! so importers never do freeform key lookups on raw JSON.

pub mod client;
pub mod error;
pub mod resources;

pub use client::{Pages, RemoteClient, API_VERSION, MSG_FOLDERS};
pub use error::RemoteApiError;
