//! Implementation of `ratp-importer build`.
//!
//! Rebuilds every artifact from the extracted archives:
//! 1. clear the build directory;
//! 2. normalize and copy every icon found under the extract root;
//! 3. index the built icons;
//! 4. parse and resolve every stop table, deduplicating stations;
//! 5. write the station lists.
//!
//! Files are processed one at a time in sorted path order, so two builds
//! over the same input produce identical output.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::core::stop_table::STOP_TABLE_FILE;
use crate::core::{
    normalize_icon_name, MissingIconRecord, NormalizationError, RawIconFile, StopTable,
    TableMetadata, TableParseError,
};
use crate::ops::artifacts::{ArtifactWriter, StationCounts};
use crate::resolver::{IconInventory, StationResolver};
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::fs::{has_extension, relative_path, to_slash, walk_files};
use crate::util::shell::{Shell, Status};
use crate::util::GlobalContext;

/// What a build did, for the end-of-run summary.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Icon files found under the extract root
    pub icons_found: usize,
    /// Icon files copied into the build
    pub icons_copied: usize,
    /// Distinct icons in the build
    pub icons_built: usize,
    /// Icons whose name gave no slug
    pub icon_errors: Vec<NormalizationError>,
    /// Stop tables read
    pub tables_parsed: usize,
    /// Stop tables that could not be read
    pub skipped_tables: Vec<TableParseError>,
    /// Stop tables outside a `RATP_GTFS_<MODE>_<LINE>` folder
    pub unclassified_tables: Vec<String>,
    /// Rows read over all tables
    pub rows: usize,
    /// Rows dropped as duplicates
    pub duplicates: usize,
    /// Lines without an icon
    pub missing_icons: Vec<MissingIconRecord>,
    /// Records per station list
    pub counts: StationCounts,
}

impl BuildReport {
    /// Operator diagnostics for everything that did not go cleanly.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diags = Vec::new();

        if self.icons_found == 0 && self.tables_parsed == 0 && self.skipped_tables.is_empty() {
            diags.push(
                Diagnostic::warning("no icons or stop tables found")
                    .with_suggestion(suggestions::NOTHING_EXTRACTED),
            );
        }

        if !self.icon_errors.is_empty() {
            let mut diag = Diagnostic::warning(format!(
                "{} icon(s) skipped: name has no usable slug",
                self.icon_errors.len()
            ));
            for err in &self.icon_errors {
                diag = diag.with_context(&err.path);
            }
            diags.push(diag);
        }

        for err in &self.skipped_tables {
            let mut diag = Diagnostic::error(err.to_string()).with_location(err.file());
            if let Some(source) = std::error::Error::source(err) {
                diag = diag.with_context(source.to_string());
            }
            diags.push(diag.with_suggestion(suggestions::SKIPPED_TABLES));
        }

        if !self.unclassified_tables.is_empty() {
            let mut diag = Diagnostic::note(format!(
                "{} stop table(s) outside a line folder; their stations are only in all.json",
                self.unclassified_tables.len()
            ));
            for path in &self.unclassified_tables {
                diag = diag.with_context(path);
            }
            diags.push(diag);
        }

        if !self.missing_icons.is_empty() {
            let mut diag = Diagnostic::warning(format!(
                "{} stop table(s) have no icon",
                self.missing_icons.len()
            ));
            for missing in &self.missing_icons {
                diag = diag.with_context(format!("{} ({})", missing.icon, missing.file));
            }
            diags.push(diag.with_suggestion(suggestions::MISSING_ICONS));
        }

        diags
    }
}

/// Rebuild all artifacts from the extracted archives.
pub fn build(ctx: &GlobalContext, shell: &Arc<Shell>) -> Result<BuildReport> {
    let writer = ArtifactWriter::new(ctx.build_dir());
    let mut report = BuildReport::default();

    writer.clean()?;
    tracing::info!("Cleared {}", writer.build_dir().display());

    let inventory = build_icons(
        &ctx.extract_dir(),
        ctx.config().bus_icon_root(),
        &writer,
        shell,
        &mut report,
    )?;
    build_stations(&ctx.stop_tables_dir(), &inventory, &writer, shell, &mut report)?;

    Ok(report)
}

/// Copy every icon under `extract_dir` into the build under its slug, then
/// index the built icons.
pub fn build_icons(
    extract_dir: &Path,
    bus_root: &str,
    writer: &ArtifactWriter,
    shell: &Arc<Shell>,
    report: &mut BuildReport,
) -> Result<IconInventory> {
    let span = shell.span(Status::Building, "icons");
    let files = walk_files(extract_dir, |p| has_extension(p, "png"))?;
    report.icons_found = files.len();

    let mut progress = shell.progress(files.len() as u64, "Copying icons");
    for path in &files {
        let icon = RawIconFile::new(extract_dir, path);
        match normalize_icon_name(&icon.relative_path, &icon.base_name, bus_root) {
            Ok(slug) => {
                let built = writer.copy_icon(&icon, &slug)?;
                tracing::debug!("{} -> {}", icon.relative_path, built);
                report.icons_copied += 1;
                progress.tick(built);
            }
            Err(err) => {
                tracing::warn!("{}", err);
                shell.status(Status::Warning, &err);
                report.icon_errors.push(err);
                progress.inc(1);
            }
        }
    }
    progress.finish();

    let inventory = IconInventory::from_dir(&writer.icons_dir())?;
    report.icons_built = inventory.len();
    span.finish_with_message(format!(
        "{} icons from {} files",
        report.icons_built, report.icons_found
    ));
    Ok(inventory)
}

/// Resolve every stop table under `tables_dir` and write the station lists.
pub fn build_stations(
    tables_dir: &Path,
    inventory: &IconInventory,
    writer: &ArtifactWriter,
    shell: &Arc<Shell>,
    report: &mut BuildReport,
) -> Result<()> {
    let span = shell.span(Status::Resolving, "stations");
    let tables = walk_files(tables_dir, |p| {
        p.file_name().is_some_and(|name| name == STOP_TABLE_FILE)
    })?;

    let mut resolver = StationResolver::new();
    for path in &tables {
        let metadata = TableMetadata::from_path(&to_slash(&relative_path(tables_dir, path)));
        if !metadata.is_classified() {
            tracing::warn!("{} is not in a line folder", metadata.path);
            report.unclassified_tables.push(metadata.path.clone());
        }

        let table = match StopTable::read(path) {
            Ok(table) => table,
            Err(err) => {
                match std::error::Error::source(&err) {
                    Some(cause) => tracing::warn!("{}: {}", err, cause),
                    None => tracing::warn!("{}", err),
                }
                shell.status(Status::Skipped, &metadata.path);
                report.skipped_tables.push(err);
                continue;
            }
        };

        report.tables_parsed += 1;
        let outcome = resolver.resolve_table(&metadata, table.rows, inventory);
        report.rows += outcome.rows;
        if outcome.icon.is_none() {
            shell.status(
                Status::Missing,
                format!("icon {}-{} for {}", metadata.subtype, metadata.line_number, metadata.path),
            );
        }
    }

    let resolution = resolver.finish();
    report.duplicates = resolution.duplicates;
    report.missing_icons = resolution.missing_icons;
    report.counts = writer.write_stations(&resolution.records)?;

    span.finish_with_message(format!(
        "{} stations from {} stop tables",
        report.counts.all, report.tables_parsed
    ));
    Ok(())
}
