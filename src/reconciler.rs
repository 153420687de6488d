//! Sync run orchestration
//!
//! A run walks a fixed sequence of states:
//!
//! 1. Load the manifest (absent file means an empty declaration).
//! 2. Resolve all declared ids against the catalog in one batched call,
//!    disabled entries included so their metadata still reaches the manifest
//!    comments.
//! 3. Reset the target directory. The default is set-reconciliation: delete
//!    subdirectories no longer declared, keep up-to-date ones, mark the rest
//!    stale. `--full` restores the original wipe-and-rebuild behavior.
//! 4. Materialize entries strictly in manifest order: download each stale
//!    enabled package into a per-run holding area and extract it into its
//!    `safe_title` subdirectory.
//! 5. Persist the manifest with regenerated annotations.
//!
//! The holding area is a `TempDir`, so its cleanup is guaranteed whether or
//! not the run succeeds. The target directory is owned exclusively by this
//! engine: anything inside it that the plan does not account for is removed.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogClient, CatalogRecord};
use crate::error::{ModsyncError, Result};
use crate::manifest::{self, Annotation, ManifestEntry};
use crate::pipeline::{self, ArchiveFetcher};
use crate::progress::SyncProgress;

/// Marker file kept inside each materialized package directory; records what
/// was extracted there so the next run can tell fresh from stale.
const MARKER_FILE: &str = ".modsync.json";

/// Options for a sync run
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub manifest_path: PathBuf,
    pub target_dir: PathBuf,
    /// Wipe and rebuild the whole target directory instead of reconciling it
    pub full: bool,
    /// Compute and print the plan without touching the filesystem
    pub dry_run: bool,
    /// Isolate per-entry failures instead of aborting on the first one
    pub keep_going: bool,
}

/// What a run did, per entry category
#[derive(Debug, Default)]
pub struct SyncOutcome {
    /// Packages downloaded and extracted
    pub installed: usize,
    /// Packages already up to date and left untouched
    pub kept: usize,
    /// Disabled entries, never materialized
    pub skipped: usize,
    /// Per-entry failures collected under `--keep-going`
    pub failed: Vec<(u64, ModsyncError)>,
}

/// One manifest entry joined with its catalog record
struct PlanStep {
    entry: ManifestEntry,
    record: CatalogRecord,
}

/// State recorded in a package directory's marker file
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct PackageMarker {
    id: u64,
    #[serde(with = "chrono::serde::ts_seconds")]
    updated_at: DateTime<Utc>,
}

/// Execute a sync run
pub fn run(
    catalog: &dyn CatalogClient,
    fetcher: &dyn ArchiveFetcher,
    opts: &SyncOptions,
) -> Result<SyncOutcome> {
    // Load: an absent manifest declares nothing
    let entries = match manifest::load(&opts.manifest_path) {
        Ok(entries) => entries,
        Err(ModsyncError::ManifestNotFound { .. }) => Vec::new(),
        Err(e) => return Err(e),
    };

    // Resolve: one batched catalog call for all ids, disabled included.
    // Nothing declared means nothing to ask; the run stays offline.
    let ids: Vec<u64> = entries.iter().map(|e| e.id).collect();
    let records = if ids.is_empty() {
        Vec::new()
    } else {
        catalog.fetch_details(&ids)?
    };

    let plan = build_plan(entries, records)?;

    if opts.dry_run {
        print_plan(&plan, opts);
        return Ok(SyncOutcome::default());
    }

    // Reset happens only after the whole plan resolved, so catalog failures
    // never leave a half-reset target behind
    let fresh = reset_target(&opts.target_dir, &plan, opts.full)?;

    let holding = tempfile::tempdir().map_err(|e| ModsyncError::IoError {
        message: format!("Failed to create holding area: {}", e),
    })?;

    let mut outcome = SyncOutcome::default();
    let progress = SyncProgress::new(plan.len() as u64);

    for step in &plan {
        let id = step.entry.id;
        let title = &step.record.title;
        progress.start_entry(id, title);

        if step.entry.disabled {
            progress.entry_done(id, title, "disabled, skipped");
            outcome.skipped += 1;
            continue;
        }

        if fresh.contains(&id) {
            progress.entry_done(id, title, "up to date");
            outcome.kept += 1;
            continue;
        }

        match materialize(fetcher, step, &opts.target_dir, holding.path()) {
            Ok(()) => {
                progress.entry_done(id, title, "installed");
                outcome.installed += 1;
            }
            Err(e) if opts.keep_going => {
                progress.entry_failed(id, title, &e.to_string());
                // Leave no partially extracted directory behind
                let _ = fs::remove_dir_all(opts.target_dir.join(step.record.safe_title()));
                outcome.failed.push((id, e));
            }
            Err(e) => {
                progress.finish();
                return Err(e);
            }
        }
    }

    progress.finish();

    // Persist: annotations are regenerated from live catalog data, entry
    // order stays the manifest's own
    let annotations: HashMap<u64, Annotation> = plan
        .iter()
        .map(|step| {
            (
                step.entry.id,
                Annotation {
                    title: step.record.title.clone(),
                    updated_at: step.record.updated_at,
                },
            )
        })
        .collect();
    let entries: Vec<ManifestEntry> = plan.iter().map(|step| step.entry).collect();
    manifest::save(&opts.manifest_path, &entries, &annotations)?;

    // Cleanup of the holding area is the TempDir drop
    Ok(outcome)
}

/// Join manifest entries with catalog records by id, preserving entry order
fn build_plan(entries: Vec<ManifestEntry>, records: Vec<CatalogRecord>) -> Result<Vec<PlanStep>> {
    let mut by_id: HashMap<u64, CatalogRecord> =
        records.into_iter().map(|r| (r.id, r)).collect();

    let plan: Vec<PlanStep> = entries
        .into_iter()
        .map(|entry| {
            let record = by_id
                .remove(&entry.id)
                .ok_or(ModsyncError::MissingCatalogRecord { id: entry.id })?;
            Ok(PlanStep { entry, record })
        })
        .collect::<Result<_>>()?;

    // Enabled entries each own one subdirectory; two records mapping to the
    // same safe title would extract over each other
    let mut dirs: HashMap<String, u64> = HashMap::new();
    for step in plan.iter().filter(|step| !step.entry.disabled) {
        if let Some(&first_id) = dirs.get(&step.record.safe_title()) {
            return Err(ModsyncError::TitleCollision {
                title: step.record.safe_title(),
                first_id,
                second_id: step.entry.id,
            });
        }
        dirs.insert(step.record.safe_title(), step.entry.id);
    }

    Ok(plan)
}

fn print_plan(plan: &[PlanStep], opts: &SyncOptions) {
    use console::Style;

    println!(
        "Plan for {} ({} entr{}):",
        opts.target_dir.display(),
        plan.len(),
        if plan.len() == 1 { "y" } else { "ies" }
    );
    for step in plan {
        let action = if step.entry.disabled {
            Style::new().yellow().apply_to("skip (disabled)")
        } else {
            Style::new().green().apply_to("materialize")
        };
        println!(
            "  {} {} -> {}",
            step.entry.id,
            step.record.title,
            action
        );
    }
}

/// Bring the target directory to its pre-materialize state
///
/// Returns the set of ids whose package directories are already up to date
/// and can be kept as-is (always empty in `full` mode).
fn reset_target(target: &Path, plan: &[PlanStep], full: bool) -> Result<HashSet<u64>> {
    if full {
        // Original contract: unconditional wipe. A missing directory is the
        // expected first-run case, so removal failures are ignored here.
        let _ = fs::remove_dir_all(target);
        fs::create_dir_all(target).map_err(|e| ModsyncError::TargetResetFailed {
            path: target.display().to_string(),
            reason: e.to_string(),
        })?;
        return Ok(HashSet::new());
    }

    fs::create_dir_all(target).map_err(|e| ModsyncError::TargetResetFailed {
        path: target.display().to_string(),
        reason: e.to_string(),
    })?;

    // Desired subdirectory set: one per enabled entry
    let desired: HashMap<String, &PlanStep> = plan
        .iter()
        .filter(|step| !step.entry.disabled)
        .map(|step| (step.record.safe_title(), step))
        .collect();

    let mut fresh = HashSet::new();

    let dir_entries = fs::read_dir(target).map_err(|e| ModsyncError::TargetResetFailed {
        path: target.display().to_string(),
        reason: e.to_string(),
    })?;

    for dir_entry in dir_entries {
        let dir_entry = dir_entry.map_err(|e| ModsyncError::TargetResetFailed {
            path: target.display().to_string(),
            reason: e.to_string(),
        })?;
        let path = dir_entry.path();
        let name = dir_entry.file_name().to_string_lossy().into_owned();

        let keep = path.is_dir()
            && desired
                .get(&name)
                .is_some_and(|step| marker_matches(&path, &step.record));

        if keep {
            if let Some(step) = desired.get(&name) {
                fresh.insert(step.entry.id);
            }
            continue;
        }

        // Stale package, undeclared package, or stray file: remove it
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|e| ModsyncError::TargetResetFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    }

    Ok(fresh)
}

/// True when the package directory's marker matches the planned record
///
/// A missing or unreadable marker counts as stale.
fn marker_matches(package_dir: &Path, record: &CatalogRecord) -> bool {
    let Ok(contents) = fs::read_to_string(package_dir.join(MARKER_FILE)) else {
        return false;
    };
    let Ok(marker) = serde_json::from_str::<PackageMarker>(&contents) else {
        return false;
    };
    marker.id == record.id && marker.updated_at == record.updated_at
}

/// Download and extract one package into its target subdirectory
fn materialize(
    fetcher: &dyn ArchiveFetcher,
    step: &PlanStep,
    target: &Path,
    holding: &Path,
) -> Result<()> {
    let safe_title = step.record.safe_title();
    let archive = holding.join(format!("{}.zip", safe_title));
    pipeline::download_with_retry(fetcher, &step.record.download_url, &archive)?;

    let package_dir = target.join(&safe_title);
    pipeline::extract_archive(&archive, &package_dir)?;

    let marker = PackageMarker {
        id: step.record.id,
        updated_at: step.record.updated_at,
    };
    let contents = serde_json::to_string(&marker).map_err(|e| ModsyncError::IoError {
        message: format!("Failed to encode package marker: {}", e),
    })?;
    fs::write(package_dir.join(MARKER_FILE), contents)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use std::io::Write;

    struct StubCatalog {
        records: Vec<CatalogRecord>,
    }

    impl CatalogClient for StubCatalog {
        fn fetch_details(&self, _ids: &[u64]) -> Result<Vec<CatalogRecord>> {
            Ok(self.records.clone())
        }
    }

    /// Serves canned zip payloads by URL and counts fetches
    struct ZipFetcher {
        payloads: HashMap<String, Vec<u8>>,
        fetches: RefCell<Vec<String>>,
    }

    impl ZipFetcher {
        fn new(payloads: Vec<(&str, Vec<u8>)>) -> Self {
            Self {
                payloads: payloads
                    .into_iter()
                    .map(|(url, bytes)| (url.to_string(), bytes))
                    .collect(),
                fetches: RefCell::new(Vec::new()),
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.borrow().len()
        }
    }

    impl ArchiveFetcher for ZipFetcher {
        fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
            self.fetches.borrow_mut().push(url.to_string());
            let bytes = self.payloads.get(url).ok_or_else(|| ModsyncError::IoError {
                message: format!("404 for {}", url),
            })?;
            fs::write(dest, bytes)?;
            Ok(())
        }
    }

    fn zip_bytes(name: &str, contents: &[u8]) -> Vec<u8> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file(name, zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents).unwrap();
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }

    fn record(id: u64, title: &str, safe: &str, url: &str, ts: i64) -> CatalogRecord {
        CatalogRecord {
            id,
            title: title.to_string(),
            title_safe: safe.to_string(),
            download_url: url.to_string(),
            updated_at: Utc.timestamp_opt(ts, 0).unwrap(),
        }
    }

    struct TestRun {
        _temp: tempfile::TempDir,
        opts: SyncOptions,
    }

    impl TestRun {
        fn new() -> Self {
            let temp = tempfile::tempdir().unwrap();
            let opts = SyncOptions {
                manifest_path: temp.path().join("mods.yaml"),
                target_dir: temp.path().join("mods").join("Local"),
                full: false,
                dry_run: false,
                keep_going: false,
            };
            Self { _temp: temp, opts }
        }

        fn write_manifest(&self, contents: &str) {
            fs::write(&self.opts.manifest_path, contents).unwrap();
        }

        fn target_subdirs(&self) -> Vec<String> {
            let mut names: Vec<String> = fs::read_dir(&self.opts.target_dir)
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();
            names
        }
    }

    #[test]
    fn test_example_scenario() {
        let run_env = TestRun::new();
        run_env.write_manifest("- 111\n- id: 222\n  disabled: true\n");

        // Catalog order deliberately reversed from the manifest
        let catalog = StubCatalog {
            records: vec![
                record(222, "Beta Mod", "Beta_Mod", "https://cdn.test/222.zip", 200),
                record(111, "Alpha Mod", "Alpha_Mod", "https://cdn.test/111.zip", 100),
            ],
        };
        let fetcher = ZipFetcher::new(vec![(
            "https://cdn.test/111.zip",
            zip_bytes("mod_info.yaml", b"alpha\n"),
        )]);

        let outcome = run(&catalog, &fetcher, &run_env.opts).unwrap();
        assert_eq!(outcome.installed, 1);
        assert_eq!(outcome.skipped, 1);
        assert!(outcome.failed.is_empty());

        // Disabled entries never materialize; enabled ones fully do
        assert_eq!(run_env.target_subdirs(), vec!["Alpha_Mod".to_string()]);
        assert_eq!(
            fs::read_to_string(run_env.opts.target_dir.join("Alpha_Mod/mod_info.yaml")).unwrap(),
            "alpha\n"
        );

        // Manifest write-back: entry order preserved, annotations regenerated
        let saved = fs::read_to_string(&run_env.opts.manifest_path).unwrap();
        let expected = "\
# Alpha Mod
# https://steamcommunity.com/sharedfiles/filedetails/?id=111
# updated: 1970-01-01T00:01:40Z
- 111

# Beta Mod
# https://steamcommunity.com/sharedfiles/filedetails/?id=222
# updated: 1970-01-01T00:03:20Z
- id: 222
  disabled: true
";
        assert_eq!(saved, expected);
    }

    #[test]
    fn test_missing_catalog_record_fails_without_writing() {
        let run_env = TestRun::new();
        run_env.write_manifest("- 111\n- 999\n");

        let catalog = StubCatalog {
            records: vec![record(111, "Alpha Mod", "Alpha_Mod", "u", 100)],
        };
        let fetcher = ZipFetcher::new(vec![]);

        let err = run(&catalog, &fetcher, &run_env.opts).unwrap_err();
        assert!(matches!(err, ModsyncError::MissingCatalogRecord { id: 999 }));

        // No filesystem mutation at all: target untouched, manifest unchanged
        assert!(!run_env.opts.target_dir.exists());
        assert_eq!(
            fs::read_to_string(&run_env.opts.manifest_path).unwrap(),
            "- 111\n- 999\n"
        );
    }

    #[test]
    fn test_absent_manifest_is_empty_run() {
        let run_env = TestRun::new();

        let catalog = StubCatalog { records: vec![] };
        let fetcher = ZipFetcher::new(vec![]);

        let outcome = run(&catalog, &fetcher, &run_env.opts).unwrap();
        assert_eq!(outcome.installed + outcome.kept + outcome.skipped, 0);

        assert!(run_env.target_subdirs().is_empty());
        assert_eq!(
            fs::read_to_string(&run_env.opts.manifest_path).unwrap(),
            "[]\n"
        );
    }

    #[test]
    fn test_fail_fast_aborts_without_manifest_write() {
        let run_env = TestRun::new();
        run_env.write_manifest("- 111\n");

        let catalog = StubCatalog {
            records: vec![record(111, "Alpha Mod", "Alpha_Mod", "https://cdn.test/nope.zip", 1)],
        };
        // Fetcher knows no URLs, so every attempt fails
        let fetcher = ZipFetcher::new(vec![]);

        let err = run(&catalog, &fetcher, &run_env.opts).unwrap_err();
        assert!(matches!(err, ModsyncError::DownloadFailed { .. }));
        assert_eq!(fetcher.fetch_count(), 5);

        assert_eq!(
            fs::read_to_string(&run_env.opts.manifest_path).unwrap(),
            "- 111\n"
        );
    }

    #[test]
    fn test_keep_going_isolates_failures() {
        let run_env = TestRun::new();
        run_env.write_manifest("- 111\n- 222\n");

        let catalog = StubCatalog {
            records: vec![
                record(111, "Alpha Mod", "Alpha_Mod", "https://cdn.test/nope.zip", 1),
                record(222, "Beta Mod", "Beta_Mod", "https://cdn.test/222.zip", 2),
            ],
        };
        let fetcher = ZipFetcher::new(vec![(
            "https://cdn.test/222.zip",
            zip_bytes("mod_info.yaml", b"beta\n"),
        )]);

        let mut opts = run_env.opts.clone();
        opts.keep_going = true;

        let outcome = run(&catalog, &fetcher, &opts).unwrap();
        assert_eq!(outcome.installed, 1);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, 111);

        // The failed package leaves nothing behind; the rest materialized
        assert_eq!(run_env.target_subdirs(), vec!["Beta_Mod".to_string()]);

        // With isolation the manifest still reflects the full declaration
        let saved = fs::read_to_string(&opts.manifest_path).unwrap();
        assert!(saved.contains("- 111"));
        assert!(saved.contains("- 222"));
    }

    #[test]
    fn test_second_run_is_incremental() {
        let run_env = TestRun::new();
        run_env.write_manifest("- 111\n");

        let catalog = StubCatalog {
            records: vec![record(111, "Alpha Mod", "Alpha_Mod", "https://cdn.test/111.zip", 100)],
        };
        let fetcher = ZipFetcher::new(vec![(
            "https://cdn.test/111.zip",
            zip_bytes("mod_info.yaml", b"alpha\n"),
        )]);

        let first = run(&catalog, &fetcher, &run_env.opts).unwrap();
        assert_eq!(first.installed, 1);
        assert_eq!(fetcher.fetch_count(), 1);

        let second = run(&catalog, &fetcher, &run_env.opts).unwrap();
        assert_eq!(second.installed, 0);
        assert_eq!(second.kept, 1);
        assert_eq!(fetcher.fetch_count(), 1);
    }

    #[test]
    fn test_catalog_update_marks_package_stale() {
        let run_env = TestRun::new();
        run_env.write_manifest("- 111\n");

        let fetcher = ZipFetcher::new(vec![(
            "https://cdn.test/111.zip",
            zip_bytes("mod_info.yaml", b"alpha\n"),
        )]);

        let catalog = StubCatalog {
            records: vec![record(111, "Alpha Mod", "Alpha_Mod", "https://cdn.test/111.zip", 100)],
        };
        run(&catalog, &fetcher, &run_env.opts).unwrap();

        // Same id, newer update time on the workshop
        let catalog = StubCatalog {
            records: vec![record(111, "Alpha Mod", "Alpha_Mod", "https://cdn.test/111.zip", 500)],
        };
        let outcome = run(&catalog, &fetcher, &run_env.opts).unwrap();
        assert_eq!(outcome.installed, 1);
        assert_eq!(outcome.kept, 0);
        assert_eq!(fetcher.fetch_count(), 2);
    }

    #[test]
    fn test_undeclared_content_is_removed() {
        let run_env = TestRun::new();
        run_env.write_manifest("- 111\n");

        fs::create_dir_all(run_env.opts.target_dir.join("Manually_Placed")).unwrap();
        fs::write(run_env.opts.target_dir.join("stray.txt"), b"x").unwrap();

        let catalog = StubCatalog {
            records: vec![record(111, "Alpha Mod", "Alpha_Mod", "https://cdn.test/111.zip", 100)],
        };
        let fetcher = ZipFetcher::new(vec![(
            "https://cdn.test/111.zip",
            zip_bytes("mod_info.yaml", b"alpha\n"),
        )]);

        run(&catalog, &fetcher, &run_env.opts).unwrap();
        assert_eq!(run_env.target_subdirs(), vec!["Alpha_Mod".to_string()]);
    }

    #[test]
    fn test_full_mode_redownloads_everything() {
        let run_env = TestRun::new();
        run_env.write_manifest("- 111\n");

        let catalog = StubCatalog {
            records: vec![record(111, "Alpha Mod", "Alpha_Mod", "https://cdn.test/111.zip", 100)],
        };
        let fetcher = ZipFetcher::new(vec![(
            "https://cdn.test/111.zip",
            zip_bytes("mod_info.yaml", b"alpha\n"),
        )]);

        run(&catalog, &fetcher, &run_env.opts).unwrap();

        let mut opts = run_env.opts.clone();
        opts.full = true;
        let outcome = run(&catalog, &fetcher, &opts).unwrap();
        assert_eq!(outcome.installed, 1);
        assert_eq!(outcome.kept, 0);
        assert_eq!(fetcher.fetch_count(), 2);
    }

    #[test]
    fn test_dry_run_mutates_nothing() {
        let run_env = TestRun::new();
        run_env.write_manifest("- 111\n");

        let catalog = StubCatalog {
            records: vec![record(111, "Alpha Mod", "Alpha_Mod", "https://cdn.test/111.zip", 100)],
        };
        let fetcher = ZipFetcher::new(vec![]);

        let mut opts = run_env.opts.clone();
        opts.dry_run = true;

        run(&catalog, &fetcher, &opts).unwrap();
        assert_eq!(fetcher.fetch_count(), 0);
        assert!(!opts.target_dir.exists());
        assert_eq!(
            fs::read_to_string(&opts.manifest_path).unwrap(),
            "- 111\n"
        );
    }

    #[test]
    fn test_colliding_directory_names_rejected() {
        let run_env = TestRun::new();
        run_env.write_manifest("- 111\n- 222\n");

        // Distinct mods whose safe titles map to the same directory
        let catalog = StubCatalog {
            records: vec![
                record(111, "Alpha Mod", "Alpha_Mod", "https://cdn.test/111.zip", 100),
                record(222, "Alpha  Mod", "Alpha_Mod", "https://cdn.test/222.zip", 200),
            ],
        };
        let fetcher = ZipFetcher::new(vec![]);

        let err = run(&catalog, &fetcher, &run_env.opts).unwrap_err();
        assert!(matches!(
            err,
            ModsyncError::TitleCollision {
                first_id: 111,
                second_id: 222,
                ..
            }
        ));

        // Rejected during planning: nothing downloaded, nothing written
        assert_eq!(fetcher.fetch_count(), 0);
        assert!(!run_env.opts.target_dir.exists());
    }

    #[test]
    fn test_disabled_entry_does_not_collide() {
        let run_env = TestRun::new();
        run_env.write_manifest("- 111\n- id: 222\n  disabled: true\n");

        // The disabled entry never owns a directory, so the shared safe
        // title is harmless
        let catalog = StubCatalog {
            records: vec![
                record(111, "Alpha Mod", "Alpha_Mod", "https://cdn.test/111.zip", 100),
                record(222, "Alpha Mod", "Alpha_Mod", "https://cdn.test/222.zip", 200),
            ],
        };
        let fetcher = ZipFetcher::new(vec![(
            "https://cdn.test/111.zip",
            zip_bytes("mod_info.yaml", b"alpha\n"),
        )]);

        let outcome = run(&catalog, &fetcher, &run_env.opts).unwrap();
        assert_eq!(outcome.installed, 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_duplicate_id_rejected_before_any_mutation() {
        let run_env = TestRun::new();
        run_env.write_manifest("- 111\n- 111\n");

        let catalog = StubCatalog { records: vec![] };
        let fetcher = ZipFetcher::new(vec![]);

        let err = run(&catalog, &fetcher, &run_env.opts).unwrap_err();
        assert!(matches!(err, ModsyncError::ManifestDuplicateId { id: 111 }));
        assert!(!run_env.opts.target_dir.exists());
    }
}
