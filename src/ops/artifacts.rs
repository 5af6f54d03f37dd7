//! Build directory output: icons and station lists.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::{IconSlug, Mode, RawIconFile, StationRecord};

/// Station list holding every record, whatever its mode.
pub const ALL_STATIONS_FILE: &str = "all.json";

/// The build directory cannot be cleared or written. Fatal for the run.
#[derive(Debug, Error)]
pub enum BuildDirectoryError {
    #[error("failed to clear build directory `{}`", path.display())]
    Clean {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize station list `{file}`")]
    Serialize {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Number of records written to each station list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StationCounts {
    pub bus: usize,
    pub subway: usize,
    pub tram: usize,
    pub all: usize,
}

impl StationCounts {
    fn set(&mut self, mode: Mode, count: usize) {
        match mode {
            Mode::Bus => self.bus = count,
            Mode::Subway => self.subway = count,
            Mode::Tram => self.tram = count,
        }
    }

    /// Records that landed in no per-mode list.
    pub fn unpartitioned(&self) -> usize {
        self.all - (self.bus + self.subway + self.tram)
    }
}

/// Writes everything under the build directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    build_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        ArtifactWriter {
            build_dir: build_dir.into(),
        }
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// `<build>/icons`
    pub fn icons_dir(&self) -> PathBuf {
        self.build_dir.join("icons")
    }

    /// `<build>/stations`
    pub fn stations_dir(&self) -> PathBuf {
        self.build_dir.join("stations")
    }

    /// Remove the previous build, if any.
    pub fn clean(&self) -> Result<(), BuildDirectoryError> {
        if !self.build_dir.exists() {
            return Ok(());
        }
        std::fs::remove_dir_all(&self.build_dir).map_err(|source| BuildDirectoryError::Clean {
            path: self.build_dir.clone(),
            source,
        })
    }

    /// Copy an icon to `<build>/icons/<slug><ext>`, replacing any icon
    /// already built under that name. Returns the built file name.
    pub fn copy_icon(
        &self,
        icon: &RawIconFile,
        slug: &IconSlug,
    ) -> Result<String, BuildDirectoryError> {
        let icons_dir = self.icons_dir();
        create_dir(&icons_dir)?;

        let file_name = icon.built_file_name(slug);
        let dest = icons_dir.join(&file_name);
        std::fs::copy(&icon.source_path, &dest).map_err(|source| {
            BuildDirectoryError::Write {
                path: dest.clone(),
                source,
            }
        })?;
        Ok(file_name)
    }

    /// Write the per-mode station lists and the combined list.
    ///
    /// Records keep their accumulation order in every list. Records of any
    /// other mode only appear in the combined list.
    pub fn write_stations(
        &self,
        records: &[StationRecord],
    ) -> Result<StationCounts, BuildDirectoryError> {
        let stations_dir = self.stations_dir();
        create_dir(&stations_dir)?;

        let mut counts = StationCounts::default();
        for mode in Mode::ALL {
            let list: Vec<&StationRecord> =
                records.iter().filter(|r| r.mode() == Some(mode)).collect();
            write_json(&stations_dir, &format!("{}.json", mode), &list)?;
            counts.set(mode, list.len());
        }

        write_json(&stations_dir, ALL_STATIONS_FILE, records)?;
        counts.all = records.len();

        Ok(counts)
    }
}

fn create_dir(path: &Path) -> Result<(), BuildDirectoryError> {
    std::fs::create_dir_all(path).map_err(|source| BuildDirectoryError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: serde::Serialize + ?Sized>(
    dir: &Path,
    file: &str,
    value: &T,
) -> Result<(), BuildDirectoryError> {
    let json = serde_json::to_string(value).map_err(|source| BuildDirectoryError::Serialize {
        file: file.to_string(),
        source,
    })?;
    let path = dir.join(file);
    std::fs::write(&path, json).map_err(|source| BuildDirectoryError::Write { path, source })
}
