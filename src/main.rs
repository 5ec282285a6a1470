//! fedcat - federated catalog
//!
//! A command line tool for querying any number of independently-operated
//! device catalogs as one read-only, paginated, filterable view.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod federation;
mod filter;
mod model;
mod source;
mod storage;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

/// Default log filter when FEDCAT_LOG is not set
fn default_log_filter(verbose: bool) -> &'static str {
    if verbose { "fedcat=debug" } else { "warn" }
}

fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_env("FEDCAT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_log_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::List(args) => commands::list::run(cli.config, &cli.catalogs, args),
        Commands::Get(args) => commands::get::run(cli.config, &cli.catalogs, args),
        Commands::Filter(args) => commands::filter::run(cli.config, &cli.catalogs, args),
        Commands::Catalogs => commands::catalogs::run(cli.config, &cli.catalogs),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
