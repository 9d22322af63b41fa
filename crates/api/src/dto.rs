//! Public response shapes.
//!
//! Field-level projections of the domain models; no validation, no
//! mutation. Field names are camelCase on the wire.

use dlm_core::models::download::Download;
use dlm_core::models::version::DownloadVersion;
use dlm_core::types::{DbId, Timestamp};
use serde::Serialize;

/// A download as returned by `GET /downloads` and `POST /downloads`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub id: DbId,
    pub status: String,
    pub title: String,
    pub slug: String,
    pub author: DbId,
    pub download_link: String,
}

impl From<&Download> for DownloadResponse {
    fn from(download: &Download) -> Self {
        Self {
            id: download.id,
            status: download.status.clone(),
            title: download.title.clone(),
            slug: download.slug.clone(),
            author: download.author,
            download_link: download.download_link.clone(),
        }
    }
}

/// A version as returned by the `/downloads/{downloadId}/versions` endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResponse {
    pub id: DbId,
    pub download_id: DbId,
    pub author: DbId,
    pub version: String,
    pub menu_order: i32,
    pub date: Timestamp,
    pub url: String,
    pub download_count: i64,
}

impl From<&DownloadVersion> for VersionResponse {
    fn from(version: &DownloadVersion) -> Self {
        Self {
            id: version.id,
            download_id: version.download_id,
            author: version.author,
            version: version.version.clone(),
            menu_order: version.menu_order,
            date: version.date,
            url: version.url().to_string(),
            download_count: version.download_count,
        }
    }
}
