//! Repository for the `download_versions` table.

use async_trait::async_trait;
use dlm_core::models::version::{DownloadVersion, NewDownloadVersion};
use dlm_core::ports::{RepositoryError, VersionRepository};
use dlm_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use super::storage_error;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, download_id, author, version, date, mirrors, menu_order, download_count";

#[derive(Debug, FromRow)]
struct VersionRow {
    id: DbId,
    download_id: DbId,
    author: DbId,
    version: String,
    date: Timestamp,
    mirrors: Vec<String>,
    menu_order: i32,
    download_count: i64,
}

impl From<VersionRow> for DownloadVersion {
    fn from(row: VersionRow) -> Self {
        Self {
            id: row.id,
            download_id: row.download_id,
            author: row.author,
            version: row.version,
            date: row.date,
            mirrors: row.mirrors,
            menu_order: row.menu_order,
            download_count: row.download_count,
        }
    }
}

/// PostgreSQL implementation of [`VersionRepository`].
pub struct PgVersionRepository {
    pool: PgPool,
}

impl PgVersionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VersionRepository for PgVersionRepository {
    async fn list_by_download(
        &self,
        download_id: DbId,
    ) -> Result<Vec<DownloadVersion>, RepositoryError> {
        let query = format!(
            "SELECT {COLUMNS} FROM download_versions
             WHERE download_id = $1
             ORDER BY menu_order ASC, id DESC"
        );
        let rows = sqlx::query_as::<_, VersionRow>(&query)
            .bind(download_id)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(rows.into_iter().map(DownloadVersion::from).collect())
    }

    async fn get(&self, id: DbId) -> Result<DownloadVersion, RepositoryError> {
        let query = format!("SELECT {COLUMNS} FROM download_versions WHERE id = $1");
        sqlx::query_as::<_, VersionRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .map(DownloadVersion::from)
            .ok_or(RepositoryError::NotFound {
                entity: "DownloadVersion",
                id,
            })
    }

    /// Shift every sibling down one rank and insert the new version at rank
    /// zero, in one transaction.
    ///
    /// The parent row is locked first so that concurrent inserts for the same
    /// download queue up behind each other instead of interleaving.
    async fn insert_as_latest(
        &self,
        version: &NewDownloadVersion,
    ) -> Result<DbId, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        let parent: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM downloads WHERE id = $1 FOR UPDATE")
                .bind(version.download_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(storage_error)?;
        if parent.is_none() {
            return Err(RepositoryError::NotFound {
                entity: "Download",
                id: version.download_id,
            });
        }

        let shifted = sqlx::query(
            "UPDATE download_versions
             SET menu_order = menu_order + 1, updated_at = NOW()
             WHERE download_id = $1",
        )
        .bind(version.download_id)
        .execute(&mut *tx)
        .await
        .map_err(storage_error)?;

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO download_versions
                (download_id, author, version, date, mirrors, menu_order)
             VALUES ($1, $2, $3, $4, $5, 0)
             RETURNING id",
        )
        .bind(version.download_id)
        .bind(version.author)
        .bind(&version.version)
        .bind(version.date)
        .bind(&version.mirrors)
        .fetch_one(&mut *tx)
        .await
        .map_err(storage_error)?;

        tx.commit().await.map_err(storage_error)?;

        tracing::debug!(
            download_id = version.download_id,
            version_id = id,
            shifted = shifted.rows_affected(),
            "Inserted version as latest",
        );
        Ok(id)
    }
}
