//! geoboard-store: PostgreSQL/PostGIS persistence for the geoboard
//! message board.
//!
//! # Design principles
//!
//! - Connection pool is constructor-injected - no global handle
//! - Coordinates are always bound parameters, never formatted into SQL
//! - Find operations batch their comment lookup - no N+1 queries
//! - Store errors propagate verbatim - no retries, no translation

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{connect, create_pool, create_pool_with_options};
pub use repos::{DbError, MessageRepo};
