//! Per-conversation session and history storage.
//!
//! Replaces the global mutable maps of the original design with an
//! explicit store keyed by a caller-supplied conversation id. Travel
//! sessions are created lazily on first access and live for the
//! process lifetime.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use wayfarer_core::types::{
    ConversationEntry, FlightOffer, HotelOffer, ItineraryDraft, Role, SessionDelta, StoredMessage,
    TravelSession, WeatherSnapshot,
};

use crate::error::StoreError;

/// In-memory store for all per-conversation state.
///
/// Concurrent requests to the same conversation must serialize through
/// [`SessionStore::turn_lock`]; requests for different conversations
/// proceed in parallel.
pub struct SessionStore {
    history_window: usize,
    sessions: Mutex<HashMap<String, TravelSession>>,
    windows: Mutex<HashMap<String, Vec<ConversationEntry>>>,
    /// Append-only. The clear-history operation does not touch this log.
    log: Mutex<Vec<StoredMessage>>,
    itineraries: Mutex<Vec<ItineraryDraft>>,
    turn_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl SessionStore {
    /// Create a store whose conversation windows hold at most
    /// `history_window` entries.
    pub fn new(history_window: usize) -> Self {
        Self {
            history_window,
            sessions: Mutex::new(HashMap::new()),
            windows: Mutex::new(HashMap::new()),
            log: Mutex::new(Vec::new()),
            itineraries: Mutex::new(Vec::new()),
            turn_locks: Mutex::new(HashMap::new()),
        }
    }

    // -----------------------------------------------------------------
    // Travel sessions
    // -----------------------------------------------------------------

    /// Snapshot of the session for a conversation, created if absent.
    pub fn session(&self, conversation_id: &str) -> Result<TravelSession, StoreError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(sessions
            .entry(conversation_id.to_string())
            .or_default()
            .clone())
    }

    /// Merge a parser delta into the session (first write wins per field)
    /// and return the updated snapshot.
    pub fn apply_delta(
        &self,
        conversation_id: &str,
        delta: &SessionDelta,
    ) -> Result<TravelSession, StoreError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        let session = sessions.entry(conversation_id.to_string()).or_default();
        session.apply(delta);
        Ok(session.clone())
    }

    /// Cache flight offers on the session.
    pub fn cache_flights(
        &self,
        conversation_id: &str,
        offers: Vec<FlightOffer>,
    ) -> Result<(), StoreError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        let session = sessions.entry(conversation_id.to_string()).or_default();
        session.flight_options = offers;
        Ok(())
    }

    /// Cache hotel offers on the session.
    pub fn cache_hotels(
        &self,
        conversation_id: &str,
        offers: Vec<HotelOffer>,
    ) -> Result<(), StoreError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        let session = sessions.entry(conversation_id.to_string()).or_default();
        session.hotel_options = offers;
        Ok(())
    }

    /// Cache the most recent weather snapshot on the session.
    pub fn cache_weather(
        &self,
        conversation_id: &str,
        weather: WeatherSnapshot,
    ) -> Result<(), StoreError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        let session = sessions.entry(conversation_id.to_string()).or_default();
        session.weather_info = Some(weather);
        Ok(())
    }

    // -----------------------------------------------------------------
    // Conversation window
    // -----------------------------------------------------------------

    /// The bounded window of entries sent to the model for a conversation.
    pub fn history(&self, conversation_id: &str) -> Result<Vec<ConversationEntry>, StoreError> {
        let windows = self
            .windows
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(windows.get(conversation_id).cloned().unwrap_or_default())
    }

    /// Append an entry, evicting oldest-first past the window cap.
    ///
    /// Truncation is not pair-aware: a user entry and its assistant reply
    /// can be split across the window boundary.
    pub fn push_history(
        &self,
        conversation_id: &str,
        entry: ConversationEntry,
    ) -> Result<(), StoreError> {
        let mut windows = self
            .windows
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        let window = windows.entry(conversation_id.to_string()).or_default();
        window.push(entry);
        while window.len() > self.history_window {
            window.remove(0);
        }
        Ok(())
    }

    /// Drop the working window for a conversation.
    ///
    /// Returns whether a window existed. The append-only message log is
    /// left untouched.
    pub fn clear_history(&self, conversation_id: &str) -> Result<bool, StoreError> {
        let mut windows = self
            .windows
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(windows.remove(conversation_id).is_some())
    }

    // -----------------------------------------------------------------
    // Append-only message log
    // -----------------------------------------------------------------

    /// Record a message in the append-only log.
    pub fn record_message(
        &self,
        user_id: &str,
        role: Role,
        content: &str,
    ) -> Result<StoredMessage, StoreError> {
        let message = StoredMessage {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
        };
        let mut log = self
            .log
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        log.push(message.clone());
        Ok(message)
    }

    /// All logged messages for a user, in insertion order.
    pub fn messages(&self, user_id: &str) -> Result<Vec<StoredMessage>, StoreError> {
        let log = self
            .log
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(log
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    // -----------------------------------------------------------------
    // Saved itineraries
    // -----------------------------------------------------------------

    /// Save an itinerary draft.
    pub fn save_itinerary(&self, draft: ItineraryDraft) -> Result<(), StoreError> {
        let mut itineraries = self
            .itineraries
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        itineraries.push(draft);
        Ok(())
    }

    /// All saved itineraries, in save order.
    pub fn itineraries(&self) -> Result<Vec<ItineraryDraft>, StoreError> {
        let itineraries = self
            .itineraries
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(itineraries.clone())
    }

    // -----------------------------------------------------------------
    // Turn serialization
    // -----------------------------------------------------------------

    /// Mutex serializing turn processing for one conversation.
    pub fn turn_lock(&self, conversation_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = match self.turn_locks.lock() {
            Ok(l) => l,
            Err(e) => {
                tracing::error!("turn lock map poisoned: {}", e);
                return Arc::new(tokio::sync::Mutex::new(()));
            }
        };
        Arc::clone(
            locks
                .entry(conversation_id.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(()))),
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(10)
    }

    // ---- Sessions ----

    #[test]
    fn test_session_created_lazily() {
        let store = store();
        let session = store.session("conv-1").unwrap();
        assert!(session.destination.is_none());
        assert_eq!(session.travelers, 1);
    }

    #[test]
    fn test_apply_delta_first_write_wins() {
        let store = store();
        let delta = SessionDelta {
            destination: Some("Tokyo".to_string()),
            ..SessionDelta::default()
        };
        store.apply_delta("conv-1", &delta).unwrap();

        let delta = SessionDelta {
            destination: Some("Paris".to_string()),
            ..SessionDelta::default()
        };
        let session = store.apply_delta("conv-1", &delta).unwrap();
        assert_eq!(session.destination.as_deref(), Some("Tokyo"));
    }

    #[test]
    fn test_sessions_isolated_per_conversation() {
        let store = store();
        let delta = SessionDelta {
            destination: Some("Tokyo".to_string()),
            ..SessionDelta::default()
        };
        store.apply_delta("conv-1", &delta).unwrap();

        let other = store.session("conv-2").unwrap();
        assert!(other.destination.is_none());
    }

    #[test]
    fn test_cache_offers_and_weather() {
        let store = store();
        store
            .cache_flights(
                "conv-1",
                vec![FlightOffer {
                    id: Uuid::new_v4(),
                    airline: "ANA".to_string(),
                    flight_number: "NH812".to_string(),
                    origin: "DEL".to_string(),
                    destination: "NRT".to_string(),
                    departure: "2026-09-04T08:00".to_string(),
                    arrival: "2026-09-04T19:30".to_string(),
                    duration: "8h 00m".to_string(),
                    stops: 0,
                    price: 640.0,
                    currency: "USD".to_string(),
                }],
            )
            .unwrap();
        store
            .cache_weather(
                "conv-1",
                WeatherSnapshot {
                    location: "Tokyo".to_string(),
                    temp_avg: 22.0,
                    temp_min: 18.0,
                    temp_max: 26.0,
                    conditions: "Partly cloudy".to_string(),
                    season: "autumn".to_string(),
                    icon: "partly-cloudy".to_string(),
                },
            )
            .unwrap();

        let session = store.session("conv-1").unwrap();
        assert_eq!(session.flight_options.len(), 1);
        assert!(session.weather_info.is_some());
        assert!(session.hotel_options.is_empty());
    }

    // ---- Window ----

    #[test]
    fn test_history_empty_for_new_conversation() {
        assert!(store().history("conv-1").unwrap().is_empty());
    }

    #[test]
    fn test_push_history_in_order() {
        let store = store();
        store
            .push_history("conv-1", ConversationEntry::user("hello"))
            .unwrap();
        store
            .push_history("conv-1", ConversationEntry::assistant("hi"))
            .unwrap();

        let history = store.history("conv-1").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "hello");
        assert_eq!(history[1].content, "hi");
    }

    #[test]
    fn test_window_evicts_oldest_first() {
        let store = SessionStore::new(3);
        for i in 0..5 {
            store
                .push_history("conv-1", ConversationEntry::user(format!("msg {}", i)))
                .unwrap();
        }
        let history = store.history("conv-1").unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].content, "msg 2");
        assert_eq!(history[2].content, "msg 4");
    }

    #[test]
    fn test_window_cap_is_per_conversation() {
        let store = SessionStore::new(2);
        for i in 0..3 {
            store
                .push_history("a", ConversationEntry::user(format!("a{}", i)))
                .unwrap();
        }
        store.push_history("b", ConversationEntry::user("b0")).unwrap();

        assert_eq!(store.history("a").unwrap().len(), 2);
        assert_eq!(store.history("b").unwrap().len(), 1);
    }

    // ---- Clear history ----

    #[test]
    fn test_clear_history_drops_window_only() {
        let store = store();
        store
            .push_history("conv-1", ConversationEntry::user("hello"))
            .unwrap();
        store.record_message("user-1", Role::User, "hello").unwrap();

        assert!(store.clear_history("conv-1").unwrap());
        assert!(store.history("conv-1").unwrap().is_empty());
        // The append-only log survives.
        assert_eq!(store.messages("user-1").unwrap().len(), 1);
    }

    #[test]
    fn test_clear_history_unknown_conversation() {
        assert!(!store().clear_history("nope").unwrap());
    }

    #[test]
    fn test_clear_history_keeps_session() {
        let store = store();
        let delta = SessionDelta {
            destination: Some("Rome".to_string()),
            ..SessionDelta::default()
        };
        store.apply_delta("conv-1", &delta).unwrap();
        store
            .push_history("conv-1", ConversationEntry::user("hello"))
            .unwrap();

        store.clear_history("conv-1").unwrap();
        let session = store.session("conv-1").unwrap();
        assert_eq!(session.destination.as_deref(), Some("Rome"));
    }

    // ---- Message log ----

    #[test]
    fn test_record_message_appends() {
        let store = store();
        store.record_message("user-1", Role::User, "hi").unwrap();
        store
            .record_message("user-1", Role::Assistant, "hello")
            .unwrap();

        let messages = store.messages("user-1").unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Assistant);
    }

    #[test]
    fn test_messages_filtered_by_user() {
        let store = store();
        store.record_message("user-1", Role::User, "one").unwrap();
        store.record_message("user-2", Role::User, "two").unwrap();

        let messages = store.messages("user-1").unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "one");
    }

    #[test]
    fn test_message_ids_unique() {
        let store = store();
        let a = store.record_message("u", Role::User, "a").unwrap();
        let b = store.record_message("u", Role::User, "b").unwrap();
        assert_ne!(a.id, b.id);
    }

    // ---- Itineraries ----

    #[test]
    fn test_save_and_list_itineraries() {
        let store = store();
        store
            .save_itinerary(ItineraryDraft {
                id: Uuid::new_v4(),
                title: "3-Day Itinerary for Tokyo".to_string(),
                destination: "Tokyo".to_string(),
                days: vec![],
            })
            .unwrap();

        let saved = store.itineraries().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].destination, "Tokyo");
    }

    // ---- Turn locks ----

    #[test]
    fn test_turn_lock_same_conversation_shared() {
        let store = store();
        let a = store.turn_lock("conv-1");
        let b = store.turn_lock("conv-1");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_turn_lock_different_conversations_independent() {
        let store = store();
        let a = store.turn_lock("conv-1");
        let b = store.turn_lock("conv-2");
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_turn_lock_serializes() {
        let store = store();
        let lock = store.turn_lock("conv-1");
        let guard = lock.lock().await;
        let second = store.turn_lock("conv-1");
        assert!(second.try_lock().is_err());
        drop(guard);
        assert!(second.try_lock().is_ok());
    }

    // ---- Concurrent access ----

    #[test]
    fn test_concurrent_pushes() {
        use std::sync::Arc as StdArc;
        use std::thread;

        let store = StdArc::new(SessionStore::new(100));
        let mut handles = Vec::new();
        for i in 0..10 {
            let store = StdArc::clone(&store);
            handles.push(thread::spawn(move || {
                store
                    .push_history("conv-1", ConversationEntry::user(format!("msg {}", i)))
                    .unwrap();
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.history("conv-1").unwrap().len(), 10);
    }
}
