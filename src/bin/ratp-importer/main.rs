//! ratp-importer CLI

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ratp_importer::util::shell::{ColorChoice, Shell};
use ratp_importer::util::GlobalContext;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("ratp_importer=debug")
    } else if cli.quiet {
        EnvFilter::new("ratp_importer=error")
    } else {
        EnvFilter::new("ratp_importer=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    let color = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let shell = Arc::new(Shell::from_flags(cli.quiet, cli.verbose, color));

    let ctx = match cli.root {
        Some(root) => GlobalContext::with_root(root),
        None => GlobalContext::new()?,
    };

    match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => commands::build::execute(&ctx, &shell),
        Commands::Upgrade => commands::upgrade::execute(&ctx, &shell),
        Commands::Fetch => commands::fetch::execute(&ctx, &shell),
        Commands::Clean(args) => commands::clean::execute(args, &ctx, &shell),
    }
}
