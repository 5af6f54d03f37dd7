//! `ratp-importer build` command

use std::sync::Arc;

use anyhow::Result;

use super::print_report;
use ratp_importer::ops::build;
use ratp_importer::util::shell::Shell;
use ratp_importer::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, shell: &Arc<Shell>) -> Result<()> {
    let report = build(ctx, shell)?;
    print_report(&report, shell);
    Ok(())
}
