//! `ratp-importer upgrade` command

use std::sync::Arc;

use anyhow::Result;

use super::print_report;
use ratp_importer::ops::upgrade;
use ratp_importer::util::shell::Shell;
use ratp_importer::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, shell: &Arc<Shell>) -> Result<()> {
    let report = upgrade(ctx, shell)?;
    print_report(&report, shell);
    Ok(())
}
