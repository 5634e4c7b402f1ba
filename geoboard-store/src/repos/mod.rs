//! Repository implementations for database access
//!
//! Patterns shared by every operation:
//! - Bound parameters for all user- and caller-supplied values
//! - Find operations resolve comments with one batched query (no N+1)
//! - Store errors propagate verbatim to the caller

pub mod messages;

pub use messages::{DbError, MessageRepo};
