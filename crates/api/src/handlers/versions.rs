//! Handlers for the `/versions` resource.
//!
//! Versions are nested under downloads: `/downloads/{downloadId}/versions`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dlm_core::models::version::{CreateVersionRequest, NewDownloadVersion};

use crate::dto::VersionResponse;
use crate::error::{AppError, AppResult};
use crate::extract::{DownloadIdPath, ValidatedJson};
use crate::middleware::rbac::{RequireEditor, RequireRead};
use crate::state::AppState;

/// GET /downloads/{downloadId}/versions
///
/// List the versions of a download, most recent first. Returns 404 if the
/// download does not exist.
pub async fn list_by_download(
    RequireRead(_user): RequireRead,
    DownloadIdPath(download_id): DownloadIdPath,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<VersionResponse>>> {
    state.repos.downloads.get(download_id).await?;

    let versions = state.repos.versions.list_by_download(download_id).await?;
    Ok(Json(versions.iter().map(VersionResponse::from).collect()))
}

/// POST /downloads/{downloadId}/versions
///
/// Adds a version as the latest one of its download. Every existing
/// version moves down one rank and the new one takes rank 0, atomically.
/// The cached version listing is cleared afterwards so readers see it.
pub async fn create(
    RequireEditor(user): RequireEditor,
    DownloadIdPath(download_id): DownloadIdPath,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateVersionRequest>,
) -> AppResult<(StatusCode, Json<VersionResponse>)> {
    let repos = &state.repos;

    repos.downloads.get(download_id).await?;

    let new_version = NewDownloadVersion {
        download_id,
        author: user.id,
        version: input.version,
        date: chrono::Utc::now(),
        mirrors: vec![input.url],
    };

    let id = repos
        .versions
        .insert_as_latest(&new_version)
        .await
        .map_err(AppError::persistence)?;

    repos
        .version_cache
        .clear_versions(download_id)
        .await
        .map_err(AppError::persistence)?;

    // Re-read to pick up fields maintained by storage (download count).
    let version = repos.versions.get(id).await.map_err(AppError::persistence)?;

    tracing::info!(
        download_id,
        version_id = id,
        user_id = user.id,
        version = %version.version,
        "Download version created",
    );
    Ok((StatusCode::CREATED, Json(VersionResponse::from(&version))))
}
