//! Pure domain logic for the cross-instance data migration engine.
//!
//! This crate has no I/O: no database, no HTTP, no async. It holds the
//! shared type aliases, the ledger reference kinds, the ordered import
//! pipeline definition, and the value/URN/status coercion helpers that the
//! engine and API crates build on.

pub mod choices;
pub mod error;
pub mod pagination;
pub mod pipeline;
pub mod reference;
pub mod submission;
pub mod types;
pub mod urns;
pub mod values;
