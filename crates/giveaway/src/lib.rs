//! Giveaway entry validation and seeded winner draws.
//!
//! The `workflows::entries` and `workflows::draw` modules hold the pure core: feature
//! extraction, eligibility rules, deduplication, and the reproducible draw. Everything
//! around them (stores, importers, HTTP routes) is glue that feeds the core snapshots.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
