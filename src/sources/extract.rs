//! Zip extraction.
//!
//! The line archive is a zip of per-line zips, so every source is extracted
//! in two passes: the archive itself, then any `*.zip` found at the top of
//! its extracted directory (into a folder named after the nested zip, which
//! is removed afterwards).

use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::sources::{Source, SourceError};
use crate::util::fs::{ensure_dir, glob_files, remove_dir_all_if_exists};
use crate::util::shell::{Shell, Status};

/// Leading directories dropped from every archive entry.
const STRIP_COMPONENTS: usize = 1;

/// Extract every downloaded source into `extract_dir`, replacing its
/// previous contents. Returns the extracted source directories.
pub fn extract_sources(
    sources: &[Source],
    raw_dir: &Path,
    extract_dir: &Path,
    shell: &Arc<Shell>,
) -> Result<Vec<PathBuf>> {
    remove_dir_all_if_exists(extract_dir)?;

    let mut extracted = Vec::with_capacity(sources.len());
    for source in sources {
        let archive = source.archive_path(raw_dir);
        let dest = source.extract_path(extract_dir);

        shell.status(Status::Extracting, &source.archive);
        let files = extract_zip(&archive, &dest, STRIP_COMPONENTS)?;
        tracing::info!("Extracted {} files from {}", files, archive.display());

        extract_nested(&dest, shell)?;
        extracted.push(dest);
    }
    Ok(extracted)
}

/// Extract the `*.zip` files at the top of `dir`, then delete them.
fn extract_nested(dir: &Path, shell: &Arc<Shell>) -> Result<usize> {
    let nested = glob_files(dir, &["*.zip".to_string()])?;
    let mut progress = shell.progress(nested.len() as u64, "Uncompressing");

    for zip_path in &nested {
        let stem = zip_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dest = dir.join(&stem);

        extract_zip(zip_path, &dest, STRIP_COMPONENTS)?;
        std::fs::remove_file(zip_path)
            .with_context(|| format!("failed to remove {}", zip_path.display()))?;
        progress.tick(&stem);
    }
    progress.finish();

    Ok(nested.len())
}

/// Extract a zip archive into `dest`, returning the number of files written.
///
/// Up to `strip` leading directories are dropped from every entry; the file
/// name itself is always kept. Entries that would land outside `dest` are
/// rejected.
pub fn extract_zip(archive_path: &Path, dest: &Path, strip: usize) -> Result<usize> {
    let file = File::open(archive_path)
        .with_context(|| format!("failed to open archive: {}", archive_path.display()))?;
    let mut archive =
        zip::ZipArchive::new(BufReader::new(file)).map_err(|e| SourceError::Archive {
            archive: archive_path.to_path_buf(),
            source: e,
        })?;

    ensure_dir(dest)?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| SourceError::Archive {
            archive: archive_path.to_path_buf(),
            source: e,
        })?;

        let Some(entry_path) = entry.enclosed_name() else {
            return Err(SourceError::UnsafeEntry {
                entry: entry.name().to_string(),
            }
            .into());
        };

        let Some(relative) = strip_dirs(&entry_path, strip, entry.is_dir()) else {
            continue;
        };
        let output_path = dest.join(relative);

        if entry.is_dir() {
            ensure_dir(&output_path)?;
            continue;
        }

        if let Some(parent) = output_path.parent() {
            ensure_dir(parent)?;
        }
        let mut out = File::create(&output_path)
            .with_context(|| format!("failed to create file: {}", output_path.display()))?;
        std::io::copy(&mut entry, &mut out)
            .with_context(|| format!("failed to extract file: {}", output_path.display()))?;
        written += 1;
    }

    Ok(written)
}

/// Drop up to `strip` leading directories of an entry path. For a file the
/// last component is never dropped; a directory stripped to nothing yields
/// `None`.
fn strip_dirs(path: &Path, strip: usize, is_dir: bool) -> Option<PathBuf> {
    let parts: Vec<_> = path
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();

    let dirs = if is_dir { parts.len() } else { parts.len().saturating_sub(1) };
    let stripped: PathBuf = parts.into_iter().skip(strip.min(dirs)).collect();

    if stripped.as_os_str().is_empty() {
        None
    } else {
        Some(stripped)
    }
}
