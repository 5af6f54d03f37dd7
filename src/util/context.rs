//! Global context for importer operations.
//!
//! Provides centralized access to configuration and the working directories.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{global_config_path, load_config, Config, PROJECT_CONFIG_FILE};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Working root; relative configured paths are resolved against it
    root: PathBuf,

    /// Merged configuration
    config: Config,
}

impl GlobalContext {
    /// Create a context rooted at the current working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_root(cwd))
    }

    /// Create a context rooted at `root`, loading global and project config.
    pub fn with_root(root: PathBuf) -> Self {
        let global = global_config_path();
        let config = load_config(global.as_deref(), &root.join(PROJECT_CONFIG_FILE));
        GlobalContext { root, config }
    }

    /// Create a context with an explicit configuration.
    pub fn with_config(root: PathBuf, config: Config) -> Self {
        GlobalContext { root, config }
    }

    /// Get the working root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn resolve(&self, configured: Option<&PathBuf>, default: &str) -> PathBuf {
        match configured {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.root.join(path),
            None => self.root.join(default),
        }
    }

    /// Directory holding downloaded archives.
    pub fn raw_dir(&self) -> PathBuf {
        self.resolve(self.config.paths.raw.as_ref(), "raw")
    }

    /// Directory holding extracted archives.
    pub fn extract_dir(&self) -> PathBuf {
        self.resolve(self.config.paths.extract.as_ref(), "extract")
    }

    /// Directory holding build artifacts.
    pub fn build_dir(&self) -> PathBuf {
        self.resolve(self.config.paths.build.as_ref(), "build")
    }

    /// Extracted directory containing the GTFS line folders.
    pub fn stop_tables_dir(&self) -> PathBuf {
        self.extract_dir().join(self.config.stations_root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_config(tmp.path().to_path_buf(), Config::default());

        assert_eq!(ctx.raw_dir(), tmp.path().join("raw"));
        assert_eq!(ctx.extract_dir(), tmp.path().join("extract"));
        assert_eq!(ctx.build_dir(), tmp.path().join("build"));
        assert_eq!(
            ctx.stop_tables_dir(),
            tmp.path().join("extract").join("ratp_gtfs_lines")
        );
    }

    #[test]
    fn test_project_config_paths() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(PROJECT_CONFIG_FILE),
            "[paths]\nbuild = \"public/data\"\n",
        )
        .unwrap();

        let ctx = GlobalContext::with_root(tmp.path().to_path_buf());
        assert_eq!(ctx.build_dir(), tmp.path().join("public/data"));
        assert_eq!(ctx.raw_dir(), tmp.path().join("raw"));
    }

    #[test]
    fn test_absolute_configured_path() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.extract = Some(tmp.path().join("elsewhere"));

        let ctx = GlobalContext::with_config(PathBuf::from("/work"), config);
        assert_eq!(ctx.extract_dir(), tmp.path().join("elsewhere"));
    }
}
