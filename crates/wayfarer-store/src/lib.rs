//! In-process state for the Wayfarer backend.
//!
//! Holds per-conversation travel sessions, bounded conversation windows,
//! the append-only message log, saved itineraries, and the geocode cache.
//! All state lives for the process lifetime; nothing is persisted to disk.

pub mod cache;
pub mod error;
pub mod store;

pub use cache::GeocodeCache;
pub use error::StoreError;
pub use store::SessionStore;
