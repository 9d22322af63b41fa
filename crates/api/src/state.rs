use std::sync::Arc;

use dlm_core::ports::Repos;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Storage collaborators (downloads, versions, version cache).
    pub repos: Repos,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
}
