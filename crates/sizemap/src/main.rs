//! sizemap CLI - image size catalogs
//!
//! This is the main entry point for the sizemap command-line interface.

mod cli;
mod commands;
mod output;
mod utils;
mod version;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let catalog = cli.catalog.as_deref();

    match cli.command {
        Commands::Version(args) => commands::version::run(args),
        Commands::Validate(args) => commands::validate::run(args, catalog),
        Commands::Get(args) => commands::get::run(args, catalog),
        Commands::List(args) => commands::list::run(args, catalog),
        Commands::Merge(args) => commands::merge::run(args),
        Commands::Derive(args) => commands::derive::run(args),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Warnings by default so bounds violations are visible
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
