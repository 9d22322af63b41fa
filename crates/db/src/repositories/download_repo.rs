//! Repository for the `downloads` table.

use async_trait::async_trait;
use dlm_core::models::download::{Download, DownloadFilter, NewDownload};
use dlm_core::ports::{DownloadRepository, RepositoryError};
use dlm_core::slug::{slugify, unique_slug};
use dlm_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use super::storage_error;
use crate::links::DownloadLinks;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, status, author, created_at";

/// Serializes title checks and slug assignment across concurrent inserts.
const SLUG_LOCK_KEY: i64 = 0x646c_6d5f_736c_7567;

/// A row from the `downloads` table. The download link is not stored.
#[derive(Debug, FromRow)]
struct DownloadRow {
    id: DbId,
    title: String,
    slug: String,
    status: String,
    author: DbId,
    created_at: Timestamp,
}

impl DownloadRow {
    fn into_download(self, links: &DownloadLinks) -> Download {
        Download {
            download_link: links.link_for(self.id),
            id: self.id,
            title: self.title,
            slug: self.slug,
            status: self.status,
            author: self.author,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL implementation of [`DownloadRepository`].
pub struct PgDownloadRepository {
    pool: PgPool,
    links: DownloadLinks,
}

impl PgDownloadRepository {
    pub fn new(pool: PgPool, links: DownloadLinks) -> Self {
        Self { pool, links }
    }
}

#[async_trait]
impl DownloadRepository for PgDownloadRepository {
    async fn list(&self, filter: &DownloadFilter) -> Result<Vec<Download>, RepositoryError> {
        let query = format!(
            "SELECT {COLUMNS} FROM downloads
             WHERE ($1::TEXT IS NULL OR title = $1)
             ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, DownloadRow>(&query)
            .bind(filter.title.as_deref())
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|row| row.into_download(&self.links))
            .collect())
    }

    async fn get(&self, id: DbId) -> Result<Download, RepositoryError> {
        let query = format!("SELECT {COLUMNS} FROM downloads WHERE id = $1");
        sqlx::query_as::<_, DownloadRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .map(|row| row.into_download(&self.links))
            .ok_or(RepositoryError::NotFound {
                entity: "Download",
                id,
            })
    }

    async fn insert(&self, download: &NewDownload) -> Result<DbId, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SLUG_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;

        let (title_taken,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM downloads WHERE title = $1)")
                .bind(&download.title)
                .fetch_one(&mut *tx)
                .await
                .map_err(storage_error)?;
        if title_taken {
            return Err(RepositoryError::Duplicate {
                entity: "Download",
                field: "title",
            });
        }

        // Slugs only contain [a-z0-9-], so LIKE needs no escaping.
        let base = slugify(&download.title);
        let taken: Vec<(String,)> =
            sqlx::query_as("SELECT slug FROM downloads WHERE slug = $1 OR slug LIKE $1 || '-%'")
                .bind(&base)
                .fetch_all(&mut *tx)
                .await
                .map_err(storage_error)?;
        let taken: Vec<String> = taken.into_iter().map(|(slug,)| slug).collect();
        let slug = unique_slug(&base, &taken);

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO downloads (title, slug, status, author)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&download.title)
        .bind(&slug)
        .bind(&download.status)
        .bind(download.author)
        .fetch_one(&mut *tx)
        .await
        .map_err(storage_error)?;

        tx.commit().await.map_err(storage_error)?;
        Ok(id)
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        crate::health_check(&self.pool).await.map_err(storage_error)
    }
}
