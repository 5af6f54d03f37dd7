//! Open-data archive sources.
//!
//! A source is a zip archive published at a URL. It is downloaded into the
//! raw directory under `archive`, then extracted into `<extract>/<name>`.

pub mod download;
pub mod extract;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use download::download_sources;
pub use extract::{extract_sources, extract_zip};

/// One archive to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// File name of the downloaded archive in the raw directory
    pub archive: String,
    /// Directory name of the extracted archive
    pub name: String,
    /// Download URL
    pub url: String,
}

impl Source {
    pub fn new(archive: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Source {
            archive: archive.into(),
            name: name.into(),
            url: url.into(),
        }
    }

    /// Where the archive is stored once downloaded.
    pub fn archive_path(&self, raw_dir: &Path) -> PathBuf {
        raw_dir.join(&self.archive)
    }

    /// Where the archive is extracted.
    pub fn extract_path(&self, extract_dir: &Path) -> PathBuf {
        extract_dir.join(&self.name)
    }
}

/// The RATP open-data archives: GTFS per line, bus icons and rail icons.
pub fn default_sources() -> Vec<Source> {
    vec![
        Source::new(
            "ratp_gtfs_lines.zip",
            "ratp_gtfs_lines",
            "http://dataratp.download.opendatasoft.com/RATP_GTFS_LINES.zip",
        ),
        Source::new(
            "bus_icons.zip",
            "bus_icon",
            "http://data.ratp.fr/?eID=ics_od_datastoredownload&file=76",
        ),
        Source::new(
            "rail_icons.zip",
            "rail_icons",
            "http://data.ratp.fr/?eID=ics_od_datastoredownload&file=93",
        ),
    ]
}

/// Failure to fetch or unpack a source. Fatal for the run.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to download `{url}`: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to download `{url}`")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to open archive `{}`", archive.display())]
    Archive {
        archive: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("archive entry escapes destination directory: {entry}")]
    UnsafeEntry { entry: String },
}
