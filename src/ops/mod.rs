//! High-level operations.
//!
//! This module contains the implementation of the importer commands.

pub mod artifacts;
pub mod build;
pub mod clean;
pub mod upgrade;

pub use artifacts::{ArtifactWriter, BuildDirectoryError, StationCounts};
pub use build::{build, BuildReport};
pub use clean::clean;
pub use upgrade::{fetch, upgrade};
