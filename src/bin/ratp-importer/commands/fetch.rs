//! `ratp-importer fetch` command

use std::sync::Arc;

use anyhow::Result;

use ratp_importer::ops::fetch;
use ratp_importer::util::shell::{Shell, Status};
use ratp_importer::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, shell: &Arc<Shell>) -> Result<()> {
    let extracted = fetch(ctx, shell)?;
    for dir in &extracted {
        shell.detail(dir.display());
    }
    shell.status(
        Status::Finished,
        format!("{} sources extracted", extracted.len()),
    );
    Ok(())
}
