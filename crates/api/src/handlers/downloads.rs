//! Handlers for the `/downloads` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dlm_core::error::CoreError;
use dlm_core::models::download::{CreateDownloadRequest, DownloadFilter, NewDownload};
use dlm_core::ports::RepositoryError;

use crate::dto::DownloadResponse;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::{RequireEditor, RequireRead};
use crate::state::AppState;

/// GET /downloads
///
/// Every download, in repository order. No pagination or filtering.
pub async fn list(
    RequireRead(_user): RequireRead,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DownloadResponse>>> {
    let downloads = state
        .repos
        .downloads
        .list(&DownloadFilter::default())
        .await?;
    Ok(Json(downloads.iter().map(DownloadResponse::from).collect()))
}

/// POST /downloads
///
/// Creates a published download owned by the caller. Titles must be unique;
/// storage rejects a duplicate atomically and it maps to 400.
pub async fn create(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateDownloadRequest>,
) -> AppResult<(StatusCode, Json<DownloadResponse>)> {
    let repo = &state.repos.downloads;

    let id = repo
        .insert(&NewDownload::published(input.title, user.id))
        .await
        .map_err(|err| match err {
            RepositoryError::Duplicate { .. } => AppError::Core(CoreError::Conflict(
                "A download with the given title already exists.".into(),
            )),
            other => AppError::persistence(other),
        })?;

    // Re-read to pick up the slug and link computed by storage.
    let download = repo.get(id).await.map_err(AppError::persistence)?;

    tracing::info!(download_id = id, user_id = user.id, slug = %download.slug, "Download created");
    Ok((StatusCode::CREATED, Json(DownloadResponse::from(&download))))
}
