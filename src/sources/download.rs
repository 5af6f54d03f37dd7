//! Archive downloads.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::sources::{Source, SourceError};
use crate::util::fs::{ensure_dir, remove_dir_all_if_exists};
use crate::util::shell::{Shell, Status};

/// Download every source into `raw_dir`, replacing its previous contents.
///
/// Sources are fetched one after the other; the first failure aborts.
pub fn download_sources(sources: &[Source], raw_dir: &Path, shell: &Arc<Shell>) -> Result<Vec<PathBuf>> {
    remove_dir_all_if_exists(raw_dir)?;
    ensure_dir(raw_dir)?;

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("ratp-importer/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to create HTTP client")?;

    let mut archives = Vec::with_capacity(sources.len());
    for source in sources {
        let dest = source.archive_path(raw_dir);
        download_source(&client, source, &dest, shell)?;
        archives.push(dest);
    }
    Ok(archives)
}

/// Download one source to `dest`.
fn download_source(
    client: &reqwest::blocking::Client,
    source: &Source,
    dest: &Path,
    shell: &Arc<Shell>,
) -> Result<()> {
    shell.status(Status::Fetching, &source.url);
    tracing::info!("Fetching {} -> {}", source.url, dest.display());

    let mut response = client
        .get(&source.url)
        .send()
        .map_err(|e| SourceError::Request {
            url: source.url.clone(),
            source: e,
        })?;

    if !response.status().is_success() {
        return Err(SourceError::HttpStatus {
            url: source.url.clone(),
            status: response.status().as_u16(),
        }
        .into());
    }

    let total = response.content_length().unwrap_or(0);
    let mut progress = shell.bytes_progress(&source.archive, total);

    let file = File::create(dest)
        .with_context(|| format!("failed to create file: {}", dest.display()))?;
    let mut writer = BufWriter::new(file);
    let mut buf = [0u8; 64 * 1024];
    let mut written = 0u64;

    loop {
        let n = response
            .read(&mut buf)
            .with_context(|| format!("failed to read response body from {}", source.url))?;
        if n == 0 {
            break;
        }
        writer
            .write_all(&buf[..n])
            .with_context(|| format!("failed to write file: {}", dest.display()))?;
        written += n as u64;
        progress.inc(n as u64);
    }
    writer
        .flush()
        .with_context(|| format!("failed to write file: {}", dest.display()))?;
    progress.finish();

    tracing::debug!("Downloaded {} bytes to {}", written, dest.display());
    Ok(())
}
