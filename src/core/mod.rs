//! Core data types: icons, stop tables and station records.

pub mod icon;
pub mod station;
pub mod stop_table;
pub mod text;

pub use icon::{normalize_icon_name, IconSlug, NormalizationError, RawIconFile};
pub use station::{Center, Fingerprint, MissingIconRecord, Mode, RecordKind, StationRecord};
pub use stop_table::{RawStopRow, StopTable, TableMetadata, TableParseError};
