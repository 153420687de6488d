//! List command implementation
//!
//! Prints the declared mods with their enabled/disabled state.

use console::Style;

use crate::cli::ListArgs;
use crate::error::Result;
use crate::manifest;

/// Run list command
pub fn run(args: ListArgs, verbose: bool) -> Result<()> {
    let entries = manifest::load(&args.manifest)?;

    if entries.is_empty() {
        println!("No mods declared.");
        return Ok(());
    }

    println!("Declared mods ({}):", entries.len());
    println!();

    for entry in &entries {
        let state = if entry.disabled {
            Style::new().yellow().apply_to("disabled")
        } else {
            Style::new().green().apply_to("enabled")
        };
        println!(
            "  {} {}",
            Style::new().bold().apply_to(entry.id),
            state
        );
        if verbose {
            println!(
                "    {}",
                Style::new().dim().apply_to(manifest::workshop_url(entry.id))
            );
        }
    }

    Ok(())
}
