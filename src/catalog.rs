//! Workshop catalog client
//!
//! One batched POST to the catalog endpoint resolves workshop ids to metadata
//! records (title, download URL, update time). The response order is not
//! guaranteed to match the request order; callers join records by id.
//! Metadata lookup is a single all-or-nothing precondition for a sync run, so
//! it is not retried here (download retries live in the pipeline).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{ModsyncError, Result};

/// Default catalog endpoint (steamworkshopdownloader details API)
pub const DEFAULT_ENDPOINT: &str = "https://db.steamworkshopdownloader.io/prod/api/details/file";

/// Per-request deadline for catalog and download requests
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Metadata for a single workshop item, as returned by the catalog
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    /// Workshop item id (stringified integer on the wire)
    #[serde(rename = "publishedfileid", deserialize_with = "de_numeric_id")]
    pub id: u64,

    /// Display title
    pub title: String,

    /// Filesystem-safe derivative of the title; may be absent or empty
    #[serde(rename = "title_disk_safe", default)]
    pub title_safe: String,

    /// Archive download URL
    #[serde(rename = "file_url")]
    pub download_url: String,

    /// Last update time on the workshop
    #[serde(rename = "time_updated", with = "chrono::serde::ts_seconds")]
    pub updated_at: DateTime<Utc>,
}

impl CatalogRecord {
    /// The subdirectory name for this item under the target directory
    ///
    /// Prefers the catalog's `title_disk_safe`; falls back to a locally
    /// sanitized title so an item never lands in an empty-named directory.
    pub fn safe_title(&self) -> String {
        if !self.title_safe.is_empty() {
            return self.title_safe.clone();
        }
        let sanitized = sanitize_title(&self.title);
        if sanitized.is_empty() {
            format!("workshop_{}", self.id)
        } else {
            sanitized
        }
    }
}

/// Reduce a display title to a filesystem-safe directory name
fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
            out.push(c);
        } else if c.is_whitespace() {
            out.push('_');
        }
        // Everything else (path separators, punctuation, emoji) is dropped
    }
    out.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// The catalog returns ids as JSON strings; accept numbers too
fn de_numeric_id<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Int(u64),
    }

    match StringOrInt::deserialize(deserializer)? {
        StringOrInt::Int(id) => Ok(id),
        StringOrInt::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// Batched metadata lookup for a set of workshop ids
pub trait CatalogClient {
    /// Fetch metadata records for `ids` in one call
    ///
    /// The returned records are in arbitrary order and may be missing ids the
    /// catalog does not know; the reconciler surfaces those as errors.
    fn fetch_details(&self, ids: &[u64]) -> Result<Vec<CatalogRecord>>;
}

/// Catalog client backed by a blocking HTTP client
pub struct HttpCatalogClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpCatalogClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ModsyncError::CatalogUnavailable {
                reason: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl CatalogClient for HttpCatalogClient {
    fn fetch_details(&self, ids: &[u64]) -> Result<Vec<CatalogRecord>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(ids)
            .send()
            .map_err(|e| ModsyncError::CatalogUnavailable {
                reason: format!("Request to {} failed: {}", self.endpoint, e),
            })?;

        if !response.status().is_success() {
            return Err(ModsyncError::CatalogUnavailable {
                reason: format!("HTTP {} from {}", response.status(), self.endpoint),
            });
        }

        response
            .json()
            .map_err(|e| ModsyncError::CatalogUnavailable {
                reason: format!("Undecodable catalog response: {}", e),
            })
    }
}
