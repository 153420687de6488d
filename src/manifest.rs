//! Manifest (mods.yaml) parsing and serialization
//!
//! The manifest is the declarative list of workshop items to keep in sync.
//! Each top-level item is either a bare workshop id (enabled) or a mapping
//! with explicit `id` and `disabled` fields:
//!
//! ```yaml
//! # Bigger Building Menu
//! # https://steamcommunity.com/sharedfiles/filedetails/?id=1703611962
//! # updated: 2024-05-14T10:02:11Z
//! - 1703611962
//!
//! - id: 1717463209
//!   disabled: true
//! ```
//!
//! Comment lines are regenerated from live catalog data on every sync and
//! carry no semantic state; only the `{id, disabled}` projection round-trips.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use crate::error::{ModsyncError, Result};

/// A single declared workshop item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Workshop item id (positive, unique within the manifest)
    pub id: u64,
    /// Disabled entries keep their metadata comments but are never downloaded
    pub disabled: bool,
}

impl ManifestEntry {
    pub fn enabled(id: u64) -> Self {
        Self {
            id,
            disabled: false,
        }
    }

    pub fn disabled(id: u64) -> Self {
        Self { id, disabled: true }
    }
}

/// Write-only metadata interleaved as comments above an entry on save
#[derive(Debug, Clone)]
pub struct Annotation {
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

/// Raw manifest item as it appears on disk
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Bare(u64),
    Full {
        id: u64,
        #[serde(default)]
        disabled: bool,
    },
}

impl From<RawEntry> for ManifestEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Bare(id) => ManifestEntry::enabled(id),
            RawEntry::Full { id, disabled } => ManifestEntry { id, disabled },
        }
    }
}

/// The workshop detail page for an item, used in generated comments
pub fn workshop_url(id: u64) -> String {
    format!("https://steamcommunity.com/sharedfiles/filedetails/?id={}", id)
}

/// Load manifest entries from a file
///
/// Fails with `ManifestNotFound` when the file is absent; the sync command
/// maps that to an empty entry list so a first run is a no-op.
pub fn load(path: &Path) -> Result<Vec<ManifestEntry>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ModsyncError::ManifestNotFound {
                path: path.display().to_string(),
            }
        } else {
            ModsyncError::IoError {
                message: format!("Failed to read {}: {}", path.display(), e),
            }
        }
    })?;

    parse(&contents, path)
}

/// Parse manifest entries from a YAML string
pub fn parse(contents: &str, path: &Path) -> Result<Vec<ManifestEntry>> {
    // An empty document is an empty manifest, not a parse error
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    let raw: Vec<RawEntry> =
        serde_yaml::from_str(contents).map_err(|e| ModsyncError::ManifestParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let entries: Vec<ManifestEntry> = raw.into_iter().map(ManifestEntry::from).collect();
    validate(&entries)?;
    Ok(entries)
}

/// Validate entry invariants: positive ids, no duplicates
pub fn validate(entries: &[ManifestEntry]) -> Result<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if entry.id == 0 {
            return Err(ModsyncError::ManifestInvalidId {
                raw: "0".to_string(),
            });
        }
        if !seen.insert(entry.id) {
            return Err(ModsyncError::ManifestDuplicateId { id: entry.id });
        }
    }
    Ok(())
}

/// Serialize entries (with optional per-id annotations) to the manifest format
pub fn render(entries: &[ManifestEntry], annotations: &HashMap<u64, Annotation>) -> String {
    if entries.is_empty() {
        return "[]\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        if let Some(ann) = annotations.get(&entry.id) {
            let _ = writeln!(out, "# {}", ann.title);
            let _ = writeln!(out, "# {}", workshop_url(entry.id));
            let _ = writeln!(
                out,
                "# updated: {}",
                ann.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
            );
        }
        if entry.disabled {
            let _ = writeln!(out, "- id: {}", entry.id);
            let _ = writeln!(out, "  disabled: true");
        } else {
            let _ = writeln!(out, "- {}", entry.id);
        }
        out.push('\n');
    }

    // Single trailing newline
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

/// Save the manifest atomically (temp file in the same directory, then rename)
///
/// Readers never observe a partially written manifest; on any failure the
/// previous file is left untouched.
pub fn save(
    path: &Path,
    entries: &[ManifestEntry],
    annotations: &HashMap<u64, Annotation>,
) -> Result<()> {
    let contents = render(entries, annotations);

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        fs::create_dir_all(dir).map_err(|e| ModsyncError::ManifestWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    }

    let mut tmp = tempfile::Builder::new()
        .prefix(".mods.yaml.")
        .tempfile_in(dir.unwrap_or_else(|| Path::new(".")))
        .map_err(|e| ModsyncError::ManifestWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    use std::io::Write;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| ModsyncError::ManifestWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    tmp.persist(path)
        .map_err(|e| ModsyncError::ManifestWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    Ok(())
}
