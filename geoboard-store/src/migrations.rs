//! Schema bootstrap for the geoboard tables
//!
//! Every statement is idempotent, so `run` is safe to call on every
//! startup. The target database must be able to install PostGIS.

use sqlx::PgPool;

use crate::repos::DbError;

/// Run all geoboard migrations.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running geoboard migrations...");

    sqlx::query("CREATE EXTENSION IF NOT EXISTS postgis")
        .execute(pool)
        .await?;

    // Messages table: location is a geography point, SRID 4326
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id SERIAL PRIMARY KEY,
            message TEXT NOT NULL,
            location GEOGRAPHY(POINT, 4326) NOT NULL,
            user_id TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Comments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id SERIAL PRIMARY KEY,
            content TEXT NOT NULL,
            message_id INTEGER NOT NULL REFERENCES messages(id) ON DELETE CASCADE,
            user_id TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("geoboard migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), DbError> {
    // Radius search
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_messages_location ON messages USING GIST (location)",
    )
    .execute(pool)
    .await?;

    // Both finds order by created_at DESC
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_messages_created ON messages(created_at DESC)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_messages_user ON messages(user_id)")
        .execute(pool)
        .await?;

    // Comment resolution by message id
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_comments_message ON comments(message_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_comments_user ON comments(user_id)")
        .execute(pool)
        .await?;

    Ok(())
}
