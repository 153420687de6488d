//! Init command implementation
//!
//! Bootstraps a manifest from a seed list of workshop ids. The manifest file
//! is the single source of truth afterwards; there is no compiled-in mod
//! list.

use std::collections::HashMap;

use console::Style;

use crate::cli::InitArgs;
use crate::error::{ModsyncError, Result};
use crate::manifest::{self, ManifestEntry};

/// Run init command
pub fn run(args: InitArgs) -> Result<()> {
    if args.manifest.exists() && !args.force {
        return Err(ModsyncError::ManifestAlreadyExists {
            path: args.manifest.display().to_string(),
        });
    }

    let entries: Vec<ManifestEntry> = args.ids.iter().map(|&id| ManifestEntry::enabled(id)).collect();
    manifest::validate(&entries)?;

    manifest::save(&args.manifest, &entries, &HashMap::new())?;

    println!(
        "{} {} with {} entr{}",
        Style::new().bold().green().apply_to("Created"),
        args.manifest.display(),
        entries.len(),
        if entries.len() == 1 { "y" } else { "ies" }
    );
    println!("Run 'modsync sync' to materialize the mods.");

    Ok(())
}
