//! Database connection pool construction
//!
//! The pool is built once from a [`StoreConfig`] and handed to
//! `MessageRepo` by reference; nothing in this crate reassigns it or
//! falls back to global state.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use geoboard_core::StoreConfig;

/// Build the pool for a loaded [`StoreConfig`].
///
/// # Errors
///
/// Fails if the database is unreachable or refuses the connection.
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::from_env()?;
/// let pool = connect(&config).await?;
/// ```
pub async fn connect(config: &StoreConfig) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(&config.database_url, config.max_connections).await
}

/// Create a pool with the default connection limit.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    connect(&StoreConfig::new(database_url)).await
}

/// Create a pool with an explicit connection limit.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
