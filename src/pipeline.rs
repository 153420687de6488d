//! Archive download and extraction pipeline
//!
//! Downloads stream straight to a file in the per-run holding area and are
//! retried up to [`MAX_DOWNLOAD_ATTEMPTS`] times with no backoff; workshop
//! mirrors fail transiently often enough that immediate retry usually wins.
//! Extraction always targets a freshly created package directory, so it never
//! has to merge with pre-existing files.

use std::fs;
use std::io;
use std::path::Path;

use crate::catalog::REQUEST_TIMEOUT_SECS;
use crate::error::{ModsyncError, Result};

/// Total attempts per archive download, including the first
pub const MAX_DOWNLOAD_ATTEMPTS: u32 = 5;

/// Streams one archive payload to a local file
pub trait ArchiveFetcher {
    /// Download `url` to `dest`, overwriting any existing file
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Archive fetcher backed by a blocking HTTP client
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ModsyncError::IoError {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }
}

impl ArchiveFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ModsyncError::IoError {
                message: format!("Request failed: {}", e),
            })?;

        if !response.status().is_success() {
            return Err(ModsyncError::IoError {
                message: format!("HTTP {} from {}", response.status(), url),
            });
        }

        let mut file = fs::File::create(dest)?;
        io::copy(&mut response, &mut file).map_err(|e| ModsyncError::IoError {
            message: format!("Interrupted stream from {}: {}", url, e),
        })?;

        Ok(())
    }
}

/// Download `url` to `dest`, retrying transient failures
///
/// Any partially written file is removed between attempts. After the final
/// failed attempt the last error propagates as `DownloadFailed`.
pub fn download_with_retry(fetcher: &dyn ArchiveFetcher, url: &str, dest: &Path) -> Result<()> {
    let mut last_error = String::new();

    for _ in 0..MAX_DOWNLOAD_ATTEMPTS {
        match fetcher.fetch(url, dest) {
            Ok(()) => return Ok(()),
            Err(e) => {
                last_error = e.to_string();
                let _ = fs::remove_file(dest);
            }
        }
    }

    Err(ModsyncError::DownloadFailed {
        url: url.to_string(),
        attempts: MAX_DOWNLOAD_ATTEMPTS,
        reason: last_error,
    })
}

/// Extract a zip archive into `dest`, creating it if absent
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;

    let file = fs::File::open(archive).map_err(|e| ModsyncError::ExtractFailed {
        path: archive.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut zip = zip::ZipArchive::new(file).map_err(|e| ModsyncError::ExtractFailed {
        path: archive.display().to_string(),
        reason: e.to_string(),
    })?;

    zip.extract(dest).map_err(|e| ModsyncError::ExtractFailed {
        path: archive.display().to_string(),
        reason: e.to_string(),
    })
}
