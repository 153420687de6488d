//! Error types and handling for Modsync
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Modsync operations
#[derive(Error, Diagnostic, Debug)]
pub enum ModsyncError {
    // Manifest errors
    #[error("Manifest not found: {path}")]
    #[diagnostic(
        code(modsync::manifest::not_found),
        help("Run 'modsync init <id>...' to create a manifest")
    )]
    ManifestNotFound { path: String },

    #[error("Failed to parse manifest: {path}")]
    #[diagnostic(
        code(modsync::manifest::parse_failed),
        help("Each entry must be a workshop id or a mapping with 'id' and 'disabled' fields")
    )]
    ManifestParseFailed { path: String, reason: String },

    #[error("Duplicate workshop id in manifest: {id}")]
    #[diagnostic(
        code(modsync::manifest::duplicate_id),
        help("Each workshop id may appear at most once; remove the duplicate entry")
    )]
    ManifestDuplicateId { id: u64 },

    #[error("Invalid workshop id: {raw}")]
    #[diagnostic(
        code(modsync::manifest::invalid_id),
        help("Workshop ids are positive integers, e.g. 1703611962")
    )]
    ManifestInvalidId { raw: String },

    #[error("Manifest already exists: {path}")]
    #[diagnostic(
        code(modsync::manifest::already_exists),
        help("Pass --force to overwrite the existing manifest")
    )]
    ManifestAlreadyExists { path: String },

    #[error("Failed to write manifest: {path}")]
    #[diagnostic(code(modsync::manifest::write_failed))]
    ManifestWriteFailed { path: String, reason: String },

    // Catalog errors
    #[error("Workshop catalog unavailable: {reason}")]
    #[diagnostic(
        code(modsync::catalog::unavailable),
        help("Check network connectivity and the --endpoint URL")
    )]
    CatalogUnavailable { reason: String },

    #[error("Mods {first_id} and {second_id} map to the same directory name: {title}")]
    #[diagnostic(
        code(modsync::catalog::title_collision),
        help("The two mods would overwrite each other on disk; disable one of them in the manifest")
    )]
    TitleCollision {
        title: String,
        first_id: u64,
        second_id: u64,
    },

    #[error("Catalog returned no record for workshop id {id}")]
    #[diagnostic(
        code(modsync::catalog::missing_record),
        help("The item may have been removed from the workshop; drop it from the manifest")
    )]
    MissingCatalogRecord { id: u64 },

    // Download errors
    #[error("Download failed after {attempts} attempts: {url}")]
    #[diagnostic(
        code(modsync::download::failed),
        help("Transient mirror failures are common; re-run to retry")
    )]
    DownloadFailed {
        url: String,
        attempts: u32,
        reason: String,
    },

    // Archive errors
    #[error("Failed to extract archive: {path}")]
    #[diagnostic(
        code(modsync::archive::extract_failed),
        help("The downloaded archive may be corrupt; re-run to download it again")
    )]
    ExtractFailed { path: String, reason: String },

    // Target directory errors
    #[error("Failed to reset target directory: {path}")]
    #[diagnostic(code(modsync::target::reset_failed))]
    TargetResetFailed { path: String, reason: String },

    #[error("No home directory found")]
    #[diagnostic(
        code(modsync::target::no_home),
        help("Pass --target explicitly when no home directory can be determined")
    )]
    NoHomeDirectory,

    // Sync run summary
    #[error("Sync finished with {failed} failed package(s)")]
    #[diagnostic(
        code(modsync::sync::partial_failure),
        help("See the per-package errors above; re-run to retry the failed ones")
    )]
    PartialFailure { failed: usize },

    // Generic I/O
    #[error("I/O error: {message}")]
    #[diagnostic(code(modsync::io::error))]
    IoError { message: String },
}

impl From<std::io::Error> for ModsyncError {
    fn from(err: std::io::Error) -> Self {
        ModsyncError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ModsyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModsyncError::MissingCatalogRecord { id: 1703611962 };
        assert_eq!(
            err.to_string(),
            "Catalog returned no record for workshop id 1703611962"
        );
    }

    #[test]
    fn test_error_code() {
        let err = ModsyncError::ManifestDuplicateId { id: 42 };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("modsync::manifest::duplicate_id".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ModsyncError = io_err.into();
        assert!(matches!(err, ModsyncError::IoError { .. }));
    }

    #[test]
    fn test_download_failed_display() {
        let err = ModsyncError::DownloadFailed {
            url: "https://example.com/mod.zip".to_string(),
            attempts: 5,
            reason: "connection reset".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Download failed after 5 attempts: https://example.com/mod.zip"
        );
    }
}
