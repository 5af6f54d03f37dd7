//! GTFS `stops.txt` tables.
//!
//! Each extracted line archive holds one stop table in a folder named after
//! the line (`RATP_GTFS_METRO_1/stops.txt`). The folder gives the mode and
//! line number shared by every row of the file.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

static LINE_FOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"RATP_GTFS_(.*)_(.*)/").expect("valid regex"));

/// File name of the stop tables inside the extracted line folders.
pub const STOP_TABLE_FILE: &str = "stops.txt";

/// Line identity of one stop table, derived from its path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableMetadata {
    /// Mode (`subway`, `bus`, `tram`, `rer`, ...), empty if unknown
    pub subtype: String,
    /// Line number (`1`, `3b`, `n01`, ...), empty if unknown
    pub line_number: String,
    /// `/`-separated path of the table relative to the stations root
    pub path: String,
}

impl TableMetadata {
    /// Parse the line identity out of a relative table path.
    ///
    /// Paths outside a `RATP_GTFS_<MODE>_<LINE>/` folder get an empty mode
    /// and line number; they are still processed.
    ///
    /// ```
    /// use ratp_importer::core::stop_table::TableMetadata;
    ///
    /// let meta = TableMetadata::from_path("RATP_GTFS_METRO_3B/stops.txt");
    /// assert_eq!(meta.subtype, "subway");
    /// assert_eq!(meta.line_number, "3b");
    /// ```
    pub fn from_path(relative_path: &str) -> Self {
        let (subtype, line_number) = match LINE_FOLDER.captures(relative_path) {
            Some(caps) => (
                caps[1].to_lowercase().replacen("metro", "subway", 1),
                caps[2].to_lowercase(),
            ),
            None => (String::new(), String::new()),
        };

        TableMetadata {
            subtype,
            line_number,
            path: relative_path.to_string(),
        }
    }

    /// Whether the path named a line folder.
    pub fn is_classified(&self) -> bool {
        !self.subtype.is_empty() || !self.line_number.is_empty()
    }
}

/// One data row of a stop table. Columns absent from the file read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct RawStopRow {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_desc: String,
    pub stop_lat: String,
    pub stop_lon: String,
}

/// A stop table could not be read; its rows are skipped.
#[derive(Debug, Error)]
pub enum TableParseError {
    #[error("failed to read stop table `{}`", file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed stop table `{}`", file.display())]
    Csv {
        file: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl TableParseError {
    /// Path of the table that failed.
    pub fn file(&self) -> &Path {
        match self {
            TableParseError::Io { file, .. } | TableParseError::Csv { file, .. } => file,
        }
    }
}

/// Parsed rows of one stop table.
#[derive(Debug, Clone, Default)]
pub struct StopTable {
    pub rows: Vec<RawStopRow>,
}

impl StopTable {
    /// Read and parse the stop table at `path`.
    pub fn read(path: &Path) -> Result<Self, TableParseError> {
        let contents = std::fs::read_to_string(path).map_err(|source| TableParseError::Io {
            file: path.to_path_buf(),
            source,
        })?;

        Self::parse(contents.as_bytes()).map_err(|source| TableParseError::Csv {
            file: path.to_path_buf(),
            source,
        })
    }

    /// Parse stop table contents: a header row followed by data rows.
    pub fn parse<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(strip_bom(reader)?);

        let headers = reader.headers()?.clone();
        let mut record = csv::StringRecord::new();
        let mut rows = Vec::new();

        while reader.read_record(&mut record)? {
            // Short rows read their missing trailing columns as empty
            while record.len() < headers.len() {
                record.push_field("");
            }
            rows.push(record.deserialize(Some(&headers))?);
        }

        Ok(StopTable { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Drop a leading UTF-8 byte order mark, which would otherwise end up in
/// the first header name.
fn strip_bom<R: Read>(mut reader: R) -> Result<std::io::Cursor<Vec<u8>>, csv::Error> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    if bytes.starts_with(&[0xef, 0xbb, 0xbf]) {
        bytes.drain(..3);
    }
    Ok(std::io::Cursor::new(bytes))
}
