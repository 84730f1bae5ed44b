//! Error types for the chat engine.
//!
//! Only boundary validation reaches callers; extraction and provider
//! failures are absorbed inside the pipeline and degrade to defaults.

use wayfarer_store::StoreError;

/// Errors from chat turn processing.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("model error: {0}")]
    Model(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for ChatError {
    fn from(err: StoreError) -> Self {
        ChatError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(
            ChatError::EmptyMessage.to_string(),
            "message cannot be empty"
        );
        assert_eq!(
            ChatError::MessageTooLong(2000).to_string(),
            "message exceeds maximum length of 2000 characters"
        );
        assert_eq!(
            ChatError::Model("no completion".to_string()).to_string(),
            "model error: no completion"
        );
        assert_eq!(
            ChatError::Storage("lock poisoned".to_string()).to_string(),
            "storage error: lock poisoned"
        );
    }

    #[test]
    fn test_chat_error_from_store_error() {
        let err: ChatError = StoreError::LockPoisoned("sessions".to_string()).into();
        assert!(matches!(err, ChatError::Storage(_)));
        assert!(err.to_string().contains("sessions"));
    }
}
