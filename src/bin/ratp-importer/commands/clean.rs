//! `ratp-importer clean` command

use std::sync::Arc;

use anyhow::Result;

use crate::cli::CleanArgs;
use ratp_importer::ops::clean;
use ratp_importer::util::shell::{Shell, Status};
use ratp_importer::util::GlobalContext;

pub fn execute(args: CleanArgs, ctx: &GlobalContext, shell: &Arc<Shell>) -> Result<()> {
    let removed = clean(ctx, args.all)?;
    if removed.is_empty() {
        shell.status(Status::Info, "nothing to clean");
    }
    for dir in &removed {
        shell.status(Status::Removed, dir.display());
    }
    Ok(())
}
