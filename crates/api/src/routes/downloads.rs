//! Route definitions for downloads and their versions.

use axum::routing::get;
use axum::Router;

use crate::handlers::downloads;
use crate::handlers::versions;
use crate::state::AppState;

/// Download and version routes.
///
/// ```text
/// GET    /downloads                           list             (read)
/// POST   /downloads                           create           (editor)
/// GET    /downloads/{downloadId}/versions     list_by_download (read)
/// POST   /downloads/{downloadId}/versions     create           (editor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/downloads", get(downloads::list).post(downloads::create))
        .route(
            "/downloads/{downloadId}/versions",
            get(versions::list_by_download).post(versions::create),
        )
}
