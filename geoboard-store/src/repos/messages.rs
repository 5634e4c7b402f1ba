//! Message repository
//!
//! The single point of interaction with persistent storage for messages
//! and comments. Inserts return the store-assigned `id`/`created_at`
//! directly (`RETURNING`), so no read-after-write is needed. Location
//! values are built with `ST_SetSRID(ST_MakePoint($x, $y), 4326)` from
//! bound parameters; coordinates never appear in query text.

use std::collections::HashMap;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use geoboard_core::{Comment, Message, NewComment, NewMessage};

/// Radius for [`MessageRepo::find_messages_near`], in meters
/// (the native unit for geography distance).
const NEARBY_RADIUS_METERS: f64 = 10_000.0;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Message repository
pub struct MessageRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> MessageRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a message with its location built from `(x, y)` in SRID 4326.
    ///
    /// The returned record carries the store-assigned `id` and
    /// `created_at`; `comments` is empty on a fresh create.
    pub async fn create_message(&self, new: NewMessage) -> Result<Message, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO messages (message, location, user_id)
            VALUES ($1, ST_SetSRID(ST_MakePoint($2, $3), 4326)::geography, $4)
            RETURNING id, created_at
            "#,
        )
        .bind(&new.text)
        .bind(new.x)
        .bind(new.y)
        .bind(&new.user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(Message {
            id: row.get("id"),
            text: new.text,
            user_id: new.user_id,
            x: new.x,
            y: new.y,
            created_at: row.get("created_at"),
            comments: Vec::new(),
        })
    }

    /// Insert a comment on an existing message.
    ///
    /// A dangling `message_id` surfaces as the store's foreign-key
    /// violation; this layer does not pre-check existence.
    pub async fn create_comment(
        &self,
        message_id: i32,
        new: NewComment,
    ) -> Result<Comment, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO comments (content, message_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, created_at
            "#,
        )
        .bind(&new.content)
        .bind(message_id)
        .bind(&new.user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(Comment {
            id: row.get("id"),
            content: new.content,
            user_id: new.user_id,
            created_at: row.get("created_at"),
        })
    }

    /// All comments for a message, oldest first (id breaks timestamp ties).
    ///
    /// A message with no comments yields an empty vec, not an error.
    pub async fn find_comments(&self, message_id: i32) -> Result<Vec<Comment>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, content, user_id, created_at
            FROM comments
            WHERE message_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(message_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.iter().map(comment_from_row).collect())
    }

    /// Messages within 10 km of `(x, y)`, most recent first, with
    /// comments attached.
    ///
    /// The boundary is inclusive: a message at exactly the radius
    /// distance is returned.
    pub async fn find_messages_near(&self, x: f64, y: f64) -> Result<Vec<Message>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                id,
                message,
                ST_X(location::geometry) AS x,
                ST_Y(location::geometry) AS y,
                user_id,
                created_at
            FROM messages
            WHERE ST_DWithin(
                location,
                ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography,
                $3
            )
            ORDER BY created_at DESC
            "#,
        )
        .bind(x)
        .bind(y)
        .bind(NEARBY_RADIUS_METERS)
        .fetch_all(self.pool)
        .await?;

        let mut messages: Vec<Message> = rows.iter().map(message_from_row).collect();
        self.attach_comments(&mut messages).await?;
        Ok(messages)
    }

    /// Messages the user authored or commented on, most recent first,
    /// with comments attached.
    ///
    /// The EXISTS form yields each message at most once, even when the
    /// user left several comments on it.
    pub async fn find_messages_by_user(&self, user_id: &str) -> Result<Vec<Message>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                id,
                message,
                ST_X(location::geometry) AS x,
                ST_Y(location::geometry) AS y,
                user_id,
                created_at
            FROM messages
            WHERE user_id = $1
               OR EXISTS (
                   SELECT 1 FROM comments
                   WHERE comments.message_id = messages.id
                     AND comments.user_id = $1
               )
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let mut messages: Vec<Message> = rows.iter().map(message_from_row).collect();
        self.attach_comments(&mut messages).await?;
        Ok(messages)
    }

    /// Resolve the comment association for a batch of messages with a
    /// single `ANY($ids)` query, grouped in memory by message id.
    ///
    /// Per-message order matches [`MessageRepo::find_comments`]. A
    /// failure here aborts the whole find; no partial results escape.
    async fn attach_comments(&self, messages: &mut [Message]) -> Result<(), DbError> {
        if messages.is_empty() {
            return Ok(());
        }

        let ids: Vec<i32> = messages.iter().map(|m| m.id).collect();
        let rows = sqlx::query(
            r#"
            SELECT id, content, message_id, user_id, created_at
            FROM comments
            WHERE message_id = ANY($1)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        tracing::debug!(
            messages = messages.len(),
            comments = rows.len(),
            "resolved comment association"
        );

        let mut by_message =
            group_comments(rows.iter().map(|r| (r.get("message_id"), comment_from_row(r))));
        for message in messages.iter_mut() {
            message.comments = by_message.remove(&message.id).unwrap_or_default();
        }
        Ok(())
    }
}

fn comment_from_row(row: &PgRow) -> Comment {
    Comment {
        id: row.get("id"),
        content: row.get("content"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
    }
}

fn message_from_row(row: &PgRow) -> Message {
    Message {
        id: row.get("id"),
        text: row.get("message"),
        user_id: row.get("user_id"),
        x: row.get("x"),
        y: row.get("y"),
        created_at: row.get("created_at"),
        comments: Vec::new(),
    }
}

/// Group (message_id, comment) pairs, preserving input order per message.
fn group_comments(pairs: impl Iterator<Item = (i32, Comment)>) -> HashMap<i32, Vec<Comment>> {
    let mut by_message: HashMap<i32, Vec<Comment>> = HashMap::new();
    for (message_id, comment) in pairs {
        by_message.entry(message_id).or_default().push(comment);
    }
    by_message
}
