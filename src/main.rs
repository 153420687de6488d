//! Modsync - declarative Steam Workshop mod synchronizer
//!
//! Reconciles a local mods directory against a YAML manifest of workshop item
//! ids: metadata comes from a batched catalog lookup, archives are downloaded
//! with bounded retry and extracted per mod, and the manifest is written back
//! annotated with live titles and update times.

use clap::Parser;

mod catalog;
mod cli;
mod commands;
mod error;
mod manifest;
mod paths;
mod pipeline;
mod progress;
mod reconciler;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sync(args) => commands::sync::run(args, cli.verbose),
        Commands::List(args) => commands::list::run(args, cli.verbose),
        Commands::Init(args) => commands::init::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
