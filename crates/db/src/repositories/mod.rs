//! PostgreSQL repository layer.
//!
//! Each repository holds a cloned `PgPool` and implements one of the
//! `dlm-core` ports. `sqlx` errors never leave this module; they are
//! converted into [`RepositoryError`] at the boundary.

pub mod download_repo;
pub mod version_repo;

pub use download_repo::PgDownloadRepository;
pub use version_repo::PgVersionRepository;

use dlm_core::ports::RepositoryError;

pub(crate) fn storage_error(err: sqlx::Error) -> RepositoryError {
    tracing::error!(error = %err, "Database error");
    RepositoryError::Storage(err.to_string())
}
