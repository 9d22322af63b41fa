//! Storage wiring.
//!
//! Builds the [`Repos`] handed to [`AppState`](crate::state::AppState):
//! PostgreSQL when `DATABASE_URL` is configured, the in-memory store
//! otherwise. Either way version listings go through the caching decorator,
//! and the same decorator instance serves as the version cache.

use std::sync::Arc;
use std::time::Duration;

use dlm_core::ports::{DownloadRepository, Repos, VersionRepository};
use dlm_db::cache::CachedVersionRepository;
use dlm_db::links::DownloadLinks;
use dlm_db::memory::InMemoryStore;
use dlm_db::repositories::{PgDownloadRepository, PgVersionRepository};

use crate::config::ServerConfig;

/// Errors raised while connecting storage at startup.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Connect the configured storage backend and assemble the repositories.
pub async fn build_repos(config: &ServerConfig) -> Result<Repos, BootstrapError> {
    let links = DownloadLinks::new(&config.site_url);
    let cache_ttl = Duration::from_secs(config.version_cache_ttl_secs);

    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, using volatile in-memory storage");
        return Ok(in_memory_repos(links, cache_ttl));
    };

    let pool = dlm_db::create_pool(database_url).await?;
    tracing::info!("Database connection pool created");

    dlm_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    dlm_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let downloads: Arc<dyn DownloadRepository> =
        Arc::new(PgDownloadRepository::new(pool.clone(), links));
    let versions: Arc<dyn VersionRepository> = Arc::new(PgVersionRepository::new(pool));
    Ok(with_version_cache(downloads, versions, cache_ttl))
}

/// Repositories backed by a fresh [`InMemoryStore`].
pub fn in_memory_repos(links: DownloadLinks, cache_ttl: Duration) -> Repos {
    let store = Arc::new(InMemoryStore::new(links));
    with_version_cache(store.clone(), store, cache_ttl)
}

fn with_version_cache(
    downloads: Arc<dyn DownloadRepository>,
    versions: Arc<dyn VersionRepository>,
    cache_ttl: Duration,
) -> Repos {
    let cached = Arc::new(CachedVersionRepository::new(versions, cache_ttl));
    Repos::new(downloads, cached.clone(), cached)
}
