//! HTTP handler implementations, grouped by resource.

pub mod migrations;
