//! geoboard-core: domain records and configuration for the geoboard
//! location-tagged message board.
//!
//! Persistence lives in geoboard-store; this crate carries the types
//! both sides of that boundary agree on.

pub mod config;
pub mod message;

pub use config::StoreConfig;
pub use message::{Comment, Message, NewComment, NewMessage};
