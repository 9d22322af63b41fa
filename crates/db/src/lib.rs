//! Storage adapters for the download manager API.
//!
//! - [`repositories`] -- PostgreSQL implementations of the `dlm-core` ports.
//! - [`memory`] -- In-process implementation, used by tests and when no
//!   database is configured.
//! - [`cache`] -- Read-through cache of version listings.

use sqlx::postgres::PgPoolOptions;

pub mod cache;
pub mod links;
pub mod memory;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
