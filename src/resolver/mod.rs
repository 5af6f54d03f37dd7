//! Station resolution.
//!
//! Turns raw stop rows into published station records. The resolver owns
//! the run-wide accumulator: records are kept in first-seen order and a row
//! whose fingerprint was already emitted (by any table of the run) is
//! dropped.

pub mod inventory;

use std::collections::HashSet;

use crate::core::text::humanize;
use crate::core::{
    Center, Fingerprint, IconSlug, MissingIconRecord, RawStopRow, RecordKind, StationRecord,
    TableMetadata,
};

pub use inventory::IconInventory;

/// Counts for one resolved stop table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOutcome {
    /// Rows read from the table
    pub rows: usize,
    /// Rows that became new station records
    pub emitted: usize,
    /// Rows dropped as duplicates of an earlier record
    pub duplicates: usize,
    /// Icon attached to the table's records, if one was found
    pub icon: Option<String>,
}

/// Everything the resolver accumulated over a run.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Station records in first-seen order
    pub records: Vec<StationRecord>,
    /// Tables whose line has no icon
    pub missing_icons: Vec<MissingIconRecord>,
    /// Rows dropped as duplicates
    pub duplicates: usize,
}

/// Run-wide station accumulator.
#[derive(Debug, Default)]
pub struct StationResolver {
    records: Vec<StationRecord>,
    seen: HashSet<Fingerprint>,
    missing_icons: Vec<MissingIconRecord>,
    duplicates: usize,
}

impl StationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every row of one stop table into the accumulator.
    ///
    /// The icon is looked up once for the table, since every row shares the
    /// table's mode and line number. A missing icon is recorded, never fatal.
    pub fn resolve_table<I>(
        &mut self,
        table: &TableMetadata,
        rows: I,
        inventory: &IconInventory,
    ) -> TableOutcome
    where
        I: IntoIterator<Item = RawStopRow>,
    {
        let key = IconSlug::for_line(&table.subtype, &table.line_number);
        let icon = inventory.lookup(&key).map(str::to_string);
        if icon.is_none() {
            self.missing_icons.push(MissingIconRecord {
                icon: key.to_string(),
                file: table.path.clone(),
            });
        }

        let mut outcome = TableOutcome {
            icon: icon.clone(),
            ..TableOutcome::default()
        };

        for row in rows {
            outcome.rows += 1;
            let record = build_record(table, row, icon.clone());
            if self.push(record) {
                outcome.emitted += 1;
            } else {
                outcome.duplicates += 1;
            }
        }

        tracing::debug!(
            "{}: {} rows, {} new stations, {} duplicates, icon {}",
            table.path,
            outcome.rows,
            outcome.emitted,
            outcome.duplicates,
            outcome.icon.as_deref().unwrap_or("<none>")
        );

        outcome
    }

    /// Append a record unless its fingerprint was already seen. Returns
    /// whether the record was kept.
    pub fn push(&mut self, record: StationRecord) -> bool {
        if self.seen.insert(record.fingerprint()) {
            self.records.push(record);
            true
        } else {
            self.duplicates += 1;
            false
        }
    }

    /// Records accumulated so far.
    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    /// Missing icons recorded so far.
    pub fn missing_icons(&self) -> &[MissingIconRecord] {
        &self.missing_icons
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hand over the accumulated records and diagnostics.
    pub fn finish(self) -> Resolution {
        Resolution {
            records: self.records,
            missing_icons: self.missing_icons,
            duplicates: self.duplicates,
        }
    }
}

/// Build the station record of one raw row.
pub fn build_record(table: &TableMetadata, row: RawStopRow, icon: Option<String>) -> StationRecord {
    StationRecord {
        kind: RecordKind::Station,
        subtype: table.subtype.clone(),
        line_number: table.line_number.clone(),
        icon,
        center: Center {
            lat: row.stop_lat,
            lng: row.stop_lon,
        },
        title: humanize(&row.stop_name),
        infos: humanize(&row.stop_desc),
        open_data_id: row.stop_id,
    }
}
