//! Store configuration from the environment
//!
//! Fails hard at startup with an actionable error when `DATABASE_URL` is
//! missing; a repository handed no connection string has nothing useful
//! to do later.

use anyhow::{Context, Result};
use std::env;

/// Default maximum connections for the pool.
/// Kept low for single-service usage.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection settings for the geoboard store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// PostgreSQL connection string. The target database must have the
    /// PostGIS extension available.
    pub database_url: String,
    pub max_connections: u32,
}

impl StoreConfig {
    /// Config with the default connection limit.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Load config from the environment, reading `.env` first if present.
    ///
    /// * `DATABASE_URL` - required
    /// * `GEOBOARD_MAX_CONNECTIONS` - optional, defaults to 5
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .context("DATABASE_URL must be set (postgres://... pointing at a PostGIS-enabled database)")?;

        let mut config = Self::new(database_url);
        if let Ok(raw) = env::var("GEOBOARD_MAX_CONNECTIONS") {
            config.max_connections = raw
                .parse()
                .context("GEOBOARD_MAX_CONNECTIONS must be a positive integer")?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env vars are process-global; tests that touch them take this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("DATABASE_URL");
        env::remove_var("GEOBOARD_MAX_CONNECTIONS");
    }

    #[test]
    fn new_uses_default_connection_limit() {
        let config = StoreConfig::new("postgres://localhost/geoboard");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.database_url, "postgres://localhost/geoboard");
    }

    #[test]
    fn from_env_requires_database_url() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let err = StoreConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn from_env_reads_connection_limit() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        env::set_var("DATABASE_URL", "postgres://localhost/geoboard");
        env::set_var("GEOBOARD_MAX_CONNECTIONS", "12");

        let config = StoreConfig::from_env().unwrap();
        assert_eq!(config.database_url, "postgres://localhost/geoboard");
        assert_eq!(config.max_connections, 12);

        clear_env();
    }

    #[test]
    fn from_env_defaults_connection_limit_when_unset() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("DATABASE_URL", "postgres://localhost/geoboard");

        let config = StoreConfig::from_env().unwrap();
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);

        clear_env();
    }

    #[test]
    fn from_env_rejects_bad_connection_limit() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        env::set_var("DATABASE_URL", "postgres://localhost/geoboard");
        env::set_var("GEOBOARD_MAX_CONNECTIONS", "plenty");

        let err = StoreConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("GEOBOARD_MAX_CONNECTIONS"));

        clear_env();
    }
}
