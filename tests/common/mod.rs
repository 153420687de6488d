//! Common test utilities for Modsync integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A test workspace for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Path of the manifest inside the workspace
    pub fn manifest_path(&self) -> PathBuf {
        self.path.join("mods.yaml")
    }

    /// Path of the target mods directory inside the workspace
    pub fn target_path(&self) -> PathBuf {
        self.path.join("mods").join("Local")
    }

    /// Write the manifest file
    pub fn write_manifest(&self, contents: &str) {
        std::fs::write(self.manifest_path(), contents).expect("Failed to write manifest");
    }

    /// Read the manifest file
    pub fn read_manifest(&self) -> String {
        std::fs::read_to_string(self.manifest_path()).expect("Failed to read manifest")
    }

    /// Check if the manifest file exists
    pub fn manifest_exists(&self) -> bool {
        self.manifest_path().exists()
    }

    /// Immediate subdirectory names under the target directory, sorted
    pub fn target_subdirs(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.target_path())
            .expect("Failed to read target directory")
            .map(|e| {
                e.expect("Failed to read dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}
