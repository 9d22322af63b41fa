//! Repository ports.
//!
//! Handlers only ever talk to storage through these traits; adapters in
//! `dlm-db` implement them. No `sqlx` types appear in any signature.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::CoreError;
use crate::models::download::{Download, DownloadFilter, NewDownload};
use crate::models::version::{DownloadVersion, NewDownloadVersion};
use crate::types::DbId;

/// Storage failures, independent of the backend.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A uniqueness rule rejected the write. Nothing was stored.
    #[error("{entity} with this {field} already exists")]
    Duplicate {
        entity: &'static str,
        field: &'static str,
    },

    /// The backend failed (connection, query, constraint, ...).
    #[error("{0}")]
    Storage(String),
}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => CoreError::NotFound { entity, id },
            err @ RepositoryError::Duplicate { .. } => CoreError::Conflict(err.to_string()),
            RepositoryError::Storage(msg) => CoreError::Internal(msg),
        }
    }
}

/// Persistence for downloads.
#[async_trait]
pub trait DownloadRepository: Send + Sync {
    /// List downloads matching `filter`, newest first.
    async fn list(&self, filter: &DownloadFilter) -> Result<Vec<Download>, RepositoryError>;

    /// Fetch a single download.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if it does not exist.
    async fn get(&self, id: DbId) -> Result<Download, RepositoryError>;

    /// Persist a new download and return its assigned id.
    ///
    /// Titles are unique (exact, case-sensitive match). The check and the
    /// insert are atomic; a taken title fails with
    /// `Err(RepositoryError::Duplicate)` and stores nothing.
    ///
    /// The slug and download link are computed here; re-fetch with
    /// [`get`](Self::get) to read them.
    async fn insert(&self, download: &NewDownload) -> Result<DbId, RepositoryError>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> Result<(), RepositoryError>;
}

/// Persistence for download versions.
#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// List the versions of a download, most recent (lowest menu order) first.
    async fn list_by_download(
        &self,
        download_id: DbId,
    ) -> Result<Vec<DownloadVersion>, RepositoryError>;

    /// Fetch a single version.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if it does not exist.
    async fn get(&self, id: DbId) -> Result<DownloadVersion, RepositoryError>;

    /// Insert `version` as the latest version of its download and return
    /// the new id.
    ///
    /// Atomically increments the menu order of every existing sibling by one
    /// and stores the new version at menu order `0`. Either all of that
    /// happens or none of it does. Concurrent calls for the same download
    /// are serialized.
    async fn insert_as_latest(
        &self,
        version: &NewDownloadVersion,
    ) -> Result<DbId, RepositoryError>;
}

/// Cached read paths for version listings.
#[async_trait]
pub trait VersionCache: Send + Sync {
    /// Drop any cached version listing of `download_id`.
    async fn clear_versions(&self, download_id: DbId) -> Result<(), RepositoryError>;
}

/// Container for the storage collaborators handed to the API layer.
///
/// `versions` and `version_cache` are usually the same caching adapter seen
/// through two traits.
#[derive(Clone)]
pub struct Repos {
    pub downloads: Arc<dyn DownloadRepository>,
    pub versions: Arc<dyn VersionRepository>,
    pub version_cache: Arc<dyn VersionCache>,
}

impl Repos {
    pub fn new(
        downloads: Arc<dyn DownloadRepository>,
        versions: Arc<dyn VersionRepository>,
        version_cache: Arc<dyn VersionCache>,
    ) -> Self {
        Self {
            downloads,
            versions,
            version_cache,
        }
    }
}
