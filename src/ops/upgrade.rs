//! Implementation of `ratp-importer fetch` and `ratp-importer upgrade`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::ops::build::{build, BuildReport};
use crate::sources::{download_sources, extract_sources};
use crate::util::shell::{Shell, Status};
use crate::util::GlobalContext;

/// Download and extract every configured source. Returns the extracted
/// source directories.
pub fn fetch(ctx: &GlobalContext, shell: &Arc<Shell>) -> Result<Vec<PathBuf>> {
    let sources = ctx.config().sources();
    tracing::info!("Fetching {} sources", sources.len());

    let span = shell.span(Status::Fetching, format!("{} archives", sources.len()));
    let archives = download_sources(&sources, &ctx.raw_dir(), shell)?;
    span.finish_with_message(format!("{} archives", archives.len()));

    let span = shell.span(Status::Extracting, format!("{} archives", archives.len()));
    let extracted = extract_sources(&sources, &ctx.raw_dir(), &ctx.extract_dir(), shell)?;
    span.finish_with_message(format!("into {}", ctx.extract_dir().display()));

    Ok(extracted)
}

/// Fetch fresh data, then rebuild.
pub fn upgrade(ctx: &GlobalContext, shell: &Arc<Shell>) -> Result<BuildReport> {
    fetch(ctx, shell)?;
    build(ctx, shell)
}
