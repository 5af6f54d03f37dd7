//! Test fixtures for importer unit tests.
//!
//! An [`ExtractFixture`] lays out an extract tree the way the downloaded
//! archives unpack, inside a temporary working root.

pub mod fixtures;

pub use fixtures::*;
