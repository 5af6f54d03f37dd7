//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// ratp-importer - build station lists from the RATP open-data archives
#[derive(Parser)]
#[command(name = "ratp-importer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Working root holding the raw, extract and build directories
    #[arg(long, global = true, value_name = "DIR", env = "RATP_IMPORTER_ROOT")]
    pub root: Option<PathBuf>,

    /// Defaults to `build`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild icons and station lists from the extracted archives
    Build,

    /// Download and extract fresh archives, then rebuild
    Upgrade,

    /// Download and extract the archives without building
    Fetch,

    /// Remove generated directories
    Clean(CleanArgs),
}

#[derive(Args)]
pub struct CleanArgs {
    /// Also remove the downloaded and extracted archives
    #[arg(long)]
    pub all: bool,
}
