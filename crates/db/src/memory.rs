//! In-process storage.
//!
//! [`InMemoryStore`] implements both repository ports over a single mutex,
//! following the same ordering, slug and menu-order rules as the PostgreSQL
//! repositories. Used by the API integration tests and when the server runs
//! without `DATABASE_URL`. Data is lost on restart.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use dlm_core::models::download::{Download, DownloadFilter, NewDownload};
use dlm_core::models::version::{DownloadVersion, NewDownloadVersion};
use dlm_core::ports::{DownloadRepository, RepositoryError, VersionRepository};
use dlm_core::slug::{slugify, unique_slug};
use dlm_core::types::DbId;

use crate::links::DownloadLinks;

#[derive(Default)]
struct State {
    next_download_id: DbId,
    next_version_id: DbId,
    downloads: Vec<Download>,
    versions: Vec<DownloadVersion>,
}

/// Volatile storage for downloads and their versions.
pub struct InMemoryStore {
    links: DownloadLinks,
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new(links: DownloadLinks) -> Self {
        Self {
            links,
            state: Mutex::new(State {
                next_download_id: 1,
                next_version_id: 1,
                ..State::default()
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Storage("in-memory store lock poisoned".into()))
    }
}

#[async_trait]
impl DownloadRepository for InMemoryStore {
    async fn list(&self, filter: &DownloadFilter) -> Result<Vec<Download>, RepositoryError> {
        let state = self.lock()?;
        // Ids grow with insertion time, so reverse id order is newest first.
        let mut downloads: Vec<Download> = state
            .downloads
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect();
        downloads.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(downloads)
    }

    async fn get(&self, id: DbId) -> Result<Download, RepositoryError> {
        let state = self.lock()?;
        state
            .downloads
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound {
                entity: "Download",
                id,
            })
    }

    async fn insert(&self, download: &NewDownload) -> Result<DbId, RepositoryError> {
        let mut state = self.lock()?;

        let same_title = DownloadFilter::by_title(download.title.as_str());
        if state.downloads.iter().any(|d| same_title.matches(d)) {
            return Err(RepositoryError::Duplicate {
                entity: "Download",
                field: "title",
            });
        }

        let taken: Vec<&str> = state.downloads.iter().map(|d| d.slug.as_str()).collect();
        let slug = unique_slug(&slugify(&download.title), &taken);

        let id = state.next_download_id;
        state.next_download_id += 1;
        state.downloads.push(Download {
            id,
            title: download.title.clone(),
            slug,
            status: download.status.clone(),
            author: download.author,
            download_link: self.links.link_for(id),
            created_at: chrono::Utc::now(),
        });
        Ok(id)
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        self.lock().map(|_| ())
    }
}

#[async_trait]
impl VersionRepository for InMemoryStore {
    async fn list_by_download(
        &self,
        download_id: DbId,
    ) -> Result<Vec<DownloadVersion>, RepositoryError> {
        let state = self.lock()?;
        let mut versions: Vec<DownloadVersion> = state
            .versions
            .iter()
            .filter(|v| v.download_id == download_id)
            .cloned()
            .collect();
        versions.sort_by(|a, b| a.menu_order.cmp(&b.menu_order).then(b.id.cmp(&a.id)));
        Ok(versions)
    }

    async fn get(&self, id: DbId) -> Result<DownloadVersion, RepositoryError> {
        let state = self.lock()?;
        state
            .versions
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound {
                entity: "DownloadVersion",
                id,
            })
    }

    async fn insert_as_latest(
        &self,
        version: &NewDownloadVersion,
    ) -> Result<DbId, RepositoryError> {
        let mut state = self.lock()?;

        if !state.downloads.iter().any(|d| d.id == version.download_id) {
            return Err(RepositoryError::NotFound {
                entity: "Download",
                id: version.download_id,
            });
        }

        for sibling in state
            .versions
            .iter_mut()
            .filter(|v| v.download_id == version.download_id)
        {
            sibling.menu_order += 1;
        }

        let id = state.next_version_id;
        state.next_version_id += 1;
        state.versions.push(DownloadVersion {
            id,
            download_id: version.download_id,
            author: version.author,
            version: version.version.clone(),
            date: version.date,
            mirrors: version.mirrors.clone(),
            menu_order: 0,
            download_count: 0,
        });
        Ok(id)
    }
}
