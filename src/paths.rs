//! Default filesystem locations

use std::path::PathBuf;

use crate::error::{ModsyncError, Result};

/// Default manifest filename, resolved against the working directory
pub const DEFAULT_MANIFEST_FILE: &str = "mods.yaml";

/// Default target directory: the game's local mods folder under the user's
/// home directory (the Unity player keeps it under `.config` on every OS)
pub fn default_target_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(ModsyncError::NoHomeDirectory)?;
    Ok(home
        .join(".config")
        .join("unity3d")
        .join("Klei")
        .join("Oxygen Not Included")
        .join("mods")
        .join("Local"))
}
