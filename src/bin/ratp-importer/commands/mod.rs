//! Command implementations

pub mod build;
pub mod clean;
pub mod fetch;
pub mod upgrade;

use ratp_importer::ops::BuildReport;
use ratp_importer::util::diagnostic::{emit, Severity};
use ratp_importer::util::shell::{Shell, Status};

/// Print the end-of-run summary of a build.
pub fn print_report(report: &BuildReport, shell: &Shell) {
    for diag in report.diagnostics() {
        if shell.is_quiet() && diag.severity != Severity::Error {
            continue;
        }
        emit(&diag, shell.use_color());
    }

    let counts = &report.counts;
    shell.status(
        Status::Finished,
        format!(
            "{} stations ({} bus, {} subway, {} tram), {} duplicates dropped",
            counts.all, counts.bus, counts.subway, counts.tram, report.duplicates
        ),
    );
    shell.detail(format!(
        "{} icons copied, {} stop tables read, {} skipped, {} rows",
        report.icons_copied,
        report.tables_parsed,
        report.skipped_tables.len(),
        report.rows
    ));
}
