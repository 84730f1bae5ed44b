//! Application state shared across all route handlers.
//!
//! AppState holds the turn orchestrator and the backing store; it is
//! passed to handlers via axum's State extractor. All fields use `Arc`
//! for cheap cloning across handler tasks.

use std::sync::Arc;
use std::time::Instant;

use wayfarer_chat::TurnOrchestrator;
use wayfarer_core::WayfarerConfig;
use wayfarer_store::SessionStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<WayfarerConfig>,
    /// Chat turn pipeline.
    pub orchestrator: Arc<TurnOrchestrator>,
    /// Session, history, log, and itinerary storage.
    pub store: Arc<SessionStore>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        config: WayfarerConfig,
        orchestrator: Arc<TurnOrchestrator>,
        store: Arc<SessionStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator,
            store,
            start_time: Instant::now(),
        }
    }
}
