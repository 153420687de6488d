//! Sync command implementation
//!
//! Wires the real HTTP catalog client and archive fetcher into the
//! reconciler and turns the run outcome into terminal output and an exit
//! status. The run sequence itself lives in [`crate::reconciler`].

use console::Style;

use crate::catalog::HttpCatalogClient;
use crate::cli::SyncArgs;
use crate::error::{ModsyncError, Result};
use crate::paths;
use crate::pipeline::HttpFetcher;
use crate::reconciler::{self, SyncOptions};

/// Run sync command
pub fn run(args: SyncArgs, verbose: bool) -> Result<()> {
    let target_dir = match args.target {
        Some(dir) => dir,
        None => paths::default_target_dir()?,
    };

    let catalog = HttpCatalogClient::new(&args.endpoint)?;
    let fetcher = HttpFetcher::new()?;

    let opts = SyncOptions {
        manifest_path: args.manifest,
        target_dir,
        full: args.full,
        dry_run: args.dry_run,
        keep_going: args.keep_going,
    };

    if verbose {
        let label = Style::new().bold();
        println!("{} {}", label.apply_to("Manifest:"), opts.manifest_path.display());
        println!("{} {}", label.apply_to("Target:"), opts.target_dir.display());
        println!("{} {}", label.apply_to("Endpoint:"), args.endpoint);
    }

    let outcome = reconciler::run(&catalog, &fetcher, &opts)?;

    if opts.dry_run {
        return Ok(());
    }

    println!(
        "{} {} installed, {} up to date, {} disabled",
        Style::new().bold().green().apply_to("Synced:"),
        outcome.installed,
        outcome.kept,
        outcome.skipped
    );

    if !outcome.failed.is_empty() {
        return Err(ModsyncError::PartialFailure {
            failed: outcome.failed.len(),
        });
    }

    Ok(())
}
