//! Message and comment records
//!
//! `Message`/`Comment` are the shapes read operations return; the store
//! alone assigns `id` and `created_at`. `NewMessage`/`NewComment` carry
//! only the caller-controlled fields, so a caller cannot even express
//! "create with this id".
//!
//! `user_id` is internal-only: it is skipped on serialization so an HTTP
//! layer serializing these records never leaks the author identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geotagged message with its comments.
///
/// `x`/`y` are longitude/latitude in SRID 4326 (WGS84). On read they are
/// reconstructed from the stored geography point, so round-trips are
/// float-bounded rather than bit-exact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i32,
    #[serde(rename = "message")]
    pub text: String,
    #[serde(skip_serializing, default)]
    pub user_id: String,
    pub x: f64,
    pub y: f64,
    pub created_at: DateTime<Utc>,
    /// Populated only by find operations; always empty on a fresh create.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A comment on a message. Belongs to exactly one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub content: String,
    #[serde(skip_serializing, default)]
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Caller input for creating a message.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub text: String,
    pub user_id: String,
    /// Longitude, degrees.
    pub x: f64,
    /// Latitude, degrees.
    pub y: f64,
}

/// Caller input for creating a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_message() -> Message {
        Message {
            id: 7,
            text: "hello".to_owned(),
            user_id: "u1".to_owned(),
            x: 2.35,
            y: 48.85,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            comments: vec![Comment {
                id: 1,
                content: "hi".to_owned(),
                user_id: "u2".to_owned(),
                created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 5, 0).unwrap(),
            }],
        }
    }

    #[test]
    fn user_id_never_serialized() {
        let json = serde_json::to_value(sample_message()).unwrap();

        assert!(json.get("user_id").is_none());
        assert_eq!(json["message"], "hello");
        assert!(json["comments"][0].get("user_id").is_none());
        assert_eq!(json["comments"][0]["content"], "hi");
    }

    #[test]
    fn deserializes_without_internal_fields() {
        let msg: Message = serde_json::from_str(
            r#"{
                "id": 3,
                "message": "ping",
                "x": 0.0,
                "y": 0.0,
                "created_at": "2024-06-01T12:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(msg.id, 3);
        assert_eq!(msg.text, "ping");
        assert!(msg.user_id.is_empty());
        assert!(msg.comments.is_empty());
    }
}
