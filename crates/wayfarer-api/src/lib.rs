//! HTTP surface for the Wayfarer backend.
//!
//! Exposes chat turns, the append-only message log, itinerary
//! save/list, session inspection, and health over an axum router with
//! CORS, tracing, and compression middleware.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
