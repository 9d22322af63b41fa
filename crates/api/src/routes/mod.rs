pub mod downloads;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the namespaced route tree.
///
/// Route hierarchy (relative to the configured namespace):
///
/// ```text
/// /downloads                                       list, create
/// /downloads/{downloadId}/versions                 list, create
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(downloads::router())
}
