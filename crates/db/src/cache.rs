//! Read-through cache for version listings.
//!
//! Listing the versions of a download is the hot read path, so the result
//! is kept per download for a configurable TTL. Writes are passed through
//! untouched: whoever changes a listing must call
//! [`VersionCache::clear_versions`] afterwards, otherwise readers keep seeing
//! the stale listing until it expires.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dlm_core::models::version::{DownloadVersion, NewDownloadVersion};
use dlm_core::ports::{RepositoryError, VersionCache, VersionRepository};
use dlm_core::types::DbId;
use tokio::sync::RwLock;

struct CachedListing {
    versions: Vec<DownloadVersion>,
    stored_at: Instant,
}

#[derive(Default)]
struct CacheState {
    listings: HashMap<DbId, CachedListing>,
    /// Bumped by every clear. A listing read from storage is only stored if
    /// the generation of its download did not move during the read.
    generations: HashMap<DbId, u64>,
}

impl CacheState {
    fn generation(&self, download_id: DbId) -> u64 {
        self.generations.get(&download_id).copied().unwrap_or(0)
    }
}

/// Caching decorator over any [`VersionRepository`].
pub struct CachedVersionRepository {
    inner: Arc<dyn VersionRepository>,
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl CachedVersionRepository {
    /// Wrap `inner`, keeping listings for `ttl`. A zero TTL disables caching.
    pub fn new(inner: Arc<dyn VersionRepository>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Number of download listings currently cached.
    pub async fn cached_listings(&self) -> usize {
        self.state.read().await.listings.len()
    }

    /// The cached listing if still fresh, otherwise the current generation.
    async fn lookup(&self, download_id: DbId) -> Result<Vec<DownloadVersion>, u64> {
        let state = self.state.read().await;
        match state.listings.get(&download_id) {
            Some(listing) if listing.stored_at.elapsed() < self.ttl => {
                Ok(listing.versions.clone())
            }
            _ => Err(state.generation(download_id)),
        }
    }
}

#[async_trait]
impl VersionRepository for CachedVersionRepository {
    async fn list_by_download(
        &self,
        download_id: DbId,
    ) -> Result<Vec<DownloadVersion>, RepositoryError> {
        if self.ttl.is_zero() {
            return self.inner.list_by_download(download_id).await;
        }

        let generation = match self.lookup(download_id).await {
            Ok(versions) => {
                tracing::trace!(download_id, "Version listing served from cache");
                return Ok(versions);
            }
            Err(generation) => generation,
        };

        let versions = self.inner.list_by_download(download_id).await?;

        let mut state = self.state.write().await;
        if state.generation(download_id) == generation {
            state.listings.insert(
                download_id,
                CachedListing {
                    versions: versions.clone(),
                    stored_at: Instant::now(),
                },
            );
        } else {
            tracing::debug!(download_id, "Listing cleared during read, not caching it");
        }
        Ok(versions)
    }

    async fn get(&self, id: DbId) -> Result<DownloadVersion, RepositoryError> {
        self.inner.get(id).await
    }

    async fn insert_as_latest(
        &self,
        version: &NewDownloadVersion,
    ) -> Result<DbId, RepositoryError> {
        self.inner.insert_as_latest(version).await
    }
}

#[async_trait]
impl VersionCache for CachedVersionRepository {
    async fn clear_versions(&self, download_id: DbId) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        *state.generations.entry(download_id).or_default() += 1;
        if state.listings.remove(&download_id).is_some() {
            tracing::debug!(download_id, "Cleared cached version listing");
        }
        Ok(())
    }
}
