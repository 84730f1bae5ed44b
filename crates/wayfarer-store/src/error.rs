//! Error type for the in-memory store.

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}
