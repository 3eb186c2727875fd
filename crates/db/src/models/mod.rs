//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod broadcast;
pub mod campaign;
pub mod channel;
pub mod contact;
pub mod flow;
pub mod flow_run;
pub mod flow_start;
pub mod group;
pub mod migration;
pub mod msg;
