//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `<config dir>/ratp-importer/config.toml` - user-wide defaults
//! - Project: `<root>/ratp-importer.toml` - overrides for one working root
//!
//! Project config takes precedence over global config. Every key is
//! optional; the defaults reproduce the `raw/`, `extract/`, `build/` layout
//! and the RATP open-data sources.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::sources::{default_sources, Source};

/// Name of the project configuration file, looked up in the working root.
pub const PROJECT_CONFIG_FILE: &str = "ratp-importer.toml";

/// Importer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Working directories
    pub paths: PathsConfig,

    /// Icon build settings
    pub icons: IconsConfig,

    /// Station build settings
    pub stations: StationsConfig,

    /// Archives to download (empty = built-in RATP sources)
    pub sources: Vec<Source>,
}

/// Directory layout. Relative paths are resolved against the working root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Where downloaded archives are stored
    pub raw: Option<PathBuf>,

    /// Where archives are extracted
    pub extract: Option<PathBuf>,

    /// Where artifacts are built
    pub build: Option<PathBuf>,
}

/// Icon settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IconsConfig {
    /// Top-level extract directory holding the (unprefixed) bus icons
    pub bus_root: Option<String>,
}

/// Station settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StationsConfig {
    /// Top-level extract directory holding the GTFS line folders
    pub root: Option<String>,
}

pub const DEFAULT_BUS_ICON_ROOT: &str = "bus_icon";
pub const DEFAULT_STATIONS_ROOT: &str = "ratp_gtfs_lines";

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist
    /// or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.paths.raw.is_some() {
            self.paths.raw = other.paths.raw;
        }
        if other.paths.extract.is_some() {
            self.paths.extract = other.paths.extract;
        }
        if other.paths.build.is_some() {
            self.paths.build = other.paths.build;
        }

        if other.icons.bus_root.is_some() {
            self.icons.bus_root = other.icons.bus_root;
        }
        if other.stations.root.is_some() {
            self.stations.root = other.stations.root;
        }

        // Source lists are replaced, not merged
        if !other.sources.is_empty() {
            self.sources = other.sources;
        }
    }

    /// Top-level extract directory of the bus icons.
    pub fn bus_icon_root(&self) -> &str {
        self.icons.bus_root.as_deref().unwrap_or(DEFAULT_BUS_ICON_ROOT)
    }

    /// Top-level extract directory of the stop tables.
    pub fn stations_root(&self) -> &str {
        self.stations.root.as_deref().unwrap_or(DEFAULT_STATIONS_ROOT)
    }

    /// Configured sources, or the built-in ones when none are configured.
    pub fn sources(&self) -> Vec<Source> {
        if self.sources.is_empty() {
            default_sources()
        } else {
            self.sources.clone()
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (`<root>/ratp-importer.toml`)
/// 2. Global config (`<config dir>/config.toml`)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global config path (`<config dir>/config.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("fr", "ratp-importer", "ratp-importer")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
