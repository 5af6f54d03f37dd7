//! ratp-importer - turns the RATP open-data archives into station lists
//!
//! The importer downloads the published GTFS-per-line and icon archives,
//! normalizes icon file names into `<mode>-<line>` slugs, and resolves every
//! `stops.txt` row into a deduplicated station record. The results are
//! written as `bus.json`, `subway.json`, `tram.json` and `all.json`.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;

/// Fixtures for unit tests.
#[cfg(test)]
pub mod test_support;

pub use core::{IconSlug, StationRecord, StopTable, TableMetadata};
pub use resolver::{IconInventory, StationResolver};
pub use util::context::GlobalContext;
