//! Extract tree fixtures.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::util::{Config, GlobalContext};

/// Header row of every generated stop table.
pub const STOP_TABLE_HEADER: &str = "stop_id,stop_name,stop_desc,stop_lat,stop_lon";

/// A temporary working root with an `extract/` tree.
#[derive(Debug)]
pub struct ExtractFixture {
    root: TempDir,
}

impl ExtractFixture {
    /// Create an empty working root.
    pub fn new() -> Self {
        ExtractFixture {
            root: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Working root path.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// `<root>/extract`
    pub fn extract_dir(&self) -> PathBuf {
        self.root().join("extract")
    }

    /// Write raw bytes at `path`, relative to the extract directory.
    pub fn raw_file(self, path: &str, contents: &[u8]) -> Self {
        let dest = self.extract_dir().join(path);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).expect("failed to create fixture dir");
        }
        std::fs::write(&dest, contents).expect("failed to write fixture file");
        self
    }

    /// Add an icon at `path`, relative to the extract directory. The file
    /// content is its own path so copies can be traced back.
    pub fn icon(self, path: &str) -> Self {
        let contents = path.as_bytes().to_vec();
        self.raw_file(path, &contents)
    }

    /// Add `ratp_gtfs_lines/<folder>/stops.txt` with the given data rows.
    pub fn stop_table(self, folder: &str, rows: &[&str]) -> Self {
        let mut contents = String::from(STOP_TABLE_HEADER);
        contents.push('\n');
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        let path = format!("ratp_gtfs_lines/{}/stops.txt", folder);
        self.raw_file(&path, contents.as_bytes())
    }

    /// A context over this root with the default configuration.
    pub fn context(&self) -> GlobalContext {
        GlobalContext::with_config(self.root().to_path_buf(), Config::default())
    }
}

impl Default for ExtractFixture {
    fn default() -> Self {
        Self::new()
    }
}
