//! Shared foundation for the Wayfarer travel-planning backend.
//!
//! Defines configuration loading, the top-level error type, and the
//! domain types (travel sessions, conversation entries, extracted
//! travel entities) used across all Wayfarer crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::WayfarerConfig;
pub use error::{Result, WayfarerError};
