//! Background tasks.
//!
//! Each submodule provides an async function intended to be spawned via
//! `tokio::spawn`. Tasks are fire-and-forget: a submitted migration runs to
//! completion or to its first fatal error, with no cancellation path.

pub mod migration_runner;
