//! Download version entity model and DTOs.

use serde::Deserialize;
use validator::Validate;

use crate::types::{DbId, Timestamp};

/// A persisted version of a download.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadVersion {
    pub id: DbId,
    pub download_id: DbId,
    pub author: DbId,
    pub version: String,
    pub date: Timestamp,
    pub mirrors: Vec<String>,
    /// Rank among the parent's versions; `0` is the most recent.
    pub menu_order: i32,
    pub download_count: i64,
}

impl DownloadVersion {
    /// The primary file URL: the first mirror, or an empty string when the
    /// version has no mirrors.
    pub fn url(&self) -> &str {
        self.mirrors.first().map(String::as_str).unwrap_or_default()
    }
}

/// A version that has not been persisted yet.
///
/// There is no menu order here: storage always inserts a new version as the
/// latest one (menu order `0`) and shifts its siblings down.
#[derive(Debug, Clone)]
pub struct NewDownloadVersion {
    pub download_id: DbId,
    pub author: DbId,
    pub version: String,
    pub date: Timestamp,
    pub mirrors: Vec<String>,
}

/// Body of `POST /downloads/{downloadId}/versions`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVersionRequest {
    /// The version string, e.g. `"1.2.3"`. Not parsed.
    #[validate(custom(function = "super::not_blank"))]
    pub version: String,
    /// The file URL.
    #[validate(url)]
    pub url: String,
}
