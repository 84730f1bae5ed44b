//! Turn orchestrator: the full pipeline for one chat turn.
//!
//! utterance -> session parser -> model client -> extraction engine ->
//! enrichment -> assembled [`TurnOutcome`]. Turns for the same
//! conversation serialize on a per-conversation lock; different
//! conversations proceed in parallel. Only boundary validation can
//! fail a turn; everything downstream degrades to defaults.

use std::sync::Arc;

use wayfarer_core::types::{ConversationEntry, Role, TurnOutcome};
use wayfarer_store::SessionStore;

use crate::enrich::Enricher;
use crate::error::ChatError;
use crate::extract::ExtractionEngine;
use crate::model::ModelClient;
use crate::parser::SessionParser;

/// Coordinates one conversation turn end to end.
pub struct TurnOrchestrator {
    parser: SessionParser,
    model: ModelClient,
    engine: ExtractionEngine,
    enricher: Enricher,
    store: Arc<SessionStore>,
    max_message_length: usize,
}

impl TurnOrchestrator {
    pub fn new(
        parser: SessionParser,
        model: ModelClient,
        engine: ExtractionEngine,
        enricher: Enricher,
        store: Arc<SessionStore>,
        max_message_length: usize,
    ) -> Self {
        Self {
            parser,
            model,
            engine,
            enricher,
            store,
            max_message_length,
        }
    }

    /// Process one user utterance and assemble the full response.
    pub async fn process_turn(
        &self,
        conversation_id: &str,
        message: &str,
    ) -> Result<TurnOutcome, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if message.len() > self.max_message_length {
            return Err(ChatError::MessageTooLong(self.max_message_length));
        }

        let turn_lock = self.store.turn_lock(conversation_id);
        let _guard = turn_lock.lock().await;

        // Update the travel session from this utterance.
        let delta = self.parser.parse(message);
        let session = self.store.apply_delta(conversation_id, &delta)?;

        // Record the user message: append-only log plus the bounded window.
        self.store
            .record_message(conversation_id, Role::User, message)?;
        self.store
            .push_history(conversation_id, ConversationEntry::user(message))?;

        // Reply text, live or canned.
        let history = self.store.history(conversation_id)?;
        let reply_text = self.model.generate(&history).await;

        // Mine the reply for structured entities.
        let extraction = self.engine.extract(&reply_text, message, &session).await;
        if let Some(ref weather) = extraction.weather {
            self.store.cache_weather(conversation_id, weather.clone())?;
        }

        // Flight and hotel offers once the session is bookable.
        let (flights, hotels) = self.enricher.enrich(&session).await;
        if !flights.is_empty() {
            self.store.cache_flights(conversation_id, flights)?;
        }
        if !hotels.is_empty() {
            self.store.cache_hotels(conversation_id, hotels)?;
        }

        // Record the assistant reply.
        self.store
            .record_message(conversation_id, Role::Assistant, &reply_text)?;
        self.store
            .push_history(conversation_id, ConversationEntry::assistant(&reply_text))?;

        let session = self.store.session(conversation_id)?;
        Ok(TurnOutcome {
            reply_text,
            locations: extraction.locations,
            itinerary: extraction.itinerary,
            weather: extraction.weather,
            local_food: extraction.local_food,
            local_attractions: extraction.local_attractions,
            session,
        })
    }

    /// Drop the conversation's working window; the append-only log is
    /// deliberately left untouched.
    pub fn clear_history(&self, conversation_id: &str) -> Result<bool, ChatError> {
        Ok(self.store.clear_history(conversation_id)?)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use wayfarer_core::types::GeoPlace;
    use wayfarer_providers::{
        Forecast, ForecastDay, GeocodingProvider, ProviderError, SyntheticFlightProvider,
        SyntheticHotelProvider, WeatherProvider,
    };
    use wayfarer_store::GeocodeCache;

    struct StaticGeocoder;

    #[async_trait]
    impl GeocodingProvider for StaticGeocoder {
        async fn search(&self, name: &str) -> Result<Vec<GeoPlace>, ProviderError> {
            Ok(vec![GeoPlace {
                id: 1,
                display_name: format!("{}, Testland", name),
                lat: 35.0,
                lon: 139.0,
                class: "place".to_string(),
                kind: "city".to_string(),
            }])
        }
    }

    struct StaticWeather;

    #[async_trait]
    impl WeatherProvider for StaticWeather {
        async fn forecast(
            &self,
            _lat: f64,
            _lon: f64,
            days: u32,
        ) -> Result<Forecast, ProviderError> {
            Ok(Forecast {
                current_temp: 20.0,
                current_conditions: "Clear sky".to_string(),
                current_icon: "sunny".to_string(),
                days: (0..days)
                    .map(|i| ForecastDay {
                        date: format!("2026-09-{:02}", i + 1),
                        temp_min: 15.0,
                        temp_max: 25.0,
                        conditions: "Clear sky".to_string(),
                    })
                    .collect(),
            })
        }
    }

    fn orchestrator() -> TurnOrchestrator {
        let store = Arc::new(SessionStore::new(10));
        let engine = ExtractionEngine::new(
            Arc::new(StaticGeocoder),
            Arc::new(StaticWeather),
            Arc::new(GeocodeCache::new()),
            3,
        );
        let enricher = Enricher::new(
            Arc::new(SyntheticFlightProvider),
            Arc::new(SyntheticHotelProvider),
            true,
        );
        TurnOrchestrator::new(
            SessionParser::new(30),
            ModelClient::canned_only(),
            engine,
            enricher,
            store,
            2000,
        )
    }

    // ---- Validation ----

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let result = orchestrator().process_turn("conv-1", "").await;
        assert!(matches!(result, Err(ChatError::EmptyMessage)));
    }

    #[tokio::test]
    async fn test_whitespace_message_rejected() {
        let result = orchestrator().process_turn("conv-1", "   ").await;
        assert!(matches!(result, Err(ChatError::EmptyMessage)));
    }

    #[tokio::test]
    async fn test_overlong_message_rejected() {
        let long = "a".repeat(2001);
        let result = orchestrator().process_turn("conv-1", &long).await;
        assert!(matches!(result, Err(ChatError::MessageTooLong(2000))));
    }

    // ---- Turn pipeline ----

    #[tokio::test]
    async fn test_turn_always_replies() {
        let outcome = orchestrator()
            .process_turn("conv-1", "hello there")
            .await
            .unwrap();
        assert!(!outcome.reply_text.is_empty());
    }

    #[tokio::test]
    async fn test_turn_updates_session() {
        let outcome = orchestrator()
            .process_turn("conv-1", "I want a 3 day trip to Tokyo")
            .await
            .unwrap();
        assert_eq!(outcome.session.destination.as_deref(), Some("Tokyo"));
        let span = outcome.session.return_date.unwrap() - outcome.session.departure_date.unwrap();
        assert_eq!(span.num_days(), 3);
    }

    #[tokio::test]
    async fn test_turn_first_write_wins_across_turns() {
        let orch = orchestrator();
        orch.process_turn("conv-1", "trip to Tokyo").await.unwrap();
        let outcome = orch.process_turn("conv-1", "trip to Paris").await.unwrap();
        assert_eq!(outcome.session.destination.as_deref(), Some("Tokyo"));
    }

    #[tokio::test]
    async fn test_turn_extracts_itinerary_end_to_end() {
        let outcome = orchestrator()
            .process_turn("conv-1", "plan a 3 day trip to Tokyo")
            .await
            .unwrap();
        let itinerary = outcome.itinerary.expect("itinerary should be extracted");
        assert_eq!(itinerary.destination, "Tokyo");
        assert_eq!(itinerary.days.len(), 3);
        assert_eq!(itinerary.days[0].title, "Arrival & Orientation");
        assert_eq!(itinerary.days[2].title, "Farewell Day");
    }

    #[tokio::test]
    async fn test_turn_extracts_food_and_attractions() {
        let outcome = orchestrator()
            .process_turn("conv-1", "what food should I eat in Tokyo")
            .await
            .unwrap();
        assert!(!outcome.local_food.is_empty());
        for item in &outcome.local_food {
            assert!(!item.image_url.is_empty());
        }
    }

    #[tokio::test]
    async fn test_turn_weather_for_destination() {
        let orch = orchestrator();
        orch.process_turn("conv-1", "trip to Tokyo").await.unwrap();
        let outcome = orch
            .process_turn("conv-1", "what's the weather in Tokyo")
            .await
            .unwrap();
        let weather = outcome.weather.expect("weather should resolve");
        assert_eq!(weather.temp_min, 15.0);
        assert_eq!(weather.temp_max, 25.0);
        assert!(outcome.session.weather_info.is_some());
    }

    #[tokio::test]
    async fn test_turn_enriches_bookable_session() {
        let orch = orchestrator();
        let outcome = orch
            .process_turn("conv-1", "plan a 3 day trip from Delhi to Tokyo")
            .await
            .unwrap();
        assert!(outcome.session.is_bookable());
        // Offers were cached on the session during the turn.
        let session = orch.store.session("conv-1").unwrap();
        assert!(!session.flight_options.is_empty());
        assert!(!session.hotel_options.is_empty());
    }

    #[tokio::test]
    async fn test_turn_records_log_and_window() {
        let orch = orchestrator();
        orch.process_turn("conv-1", "hello").await.unwrap();
        let messages = orch.store.messages("conv-1").unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(orch.store.history("conv-1").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_conversations_isolated() {
        let orch = orchestrator();
        orch.process_turn("conv-1", "trip to Tokyo").await.unwrap();
        let outcome = orch.process_turn("conv-2", "trip to Paris").await.unwrap();
        assert_eq!(outcome.session.destination.as_deref(), Some("Paris"));
    }

    // ---- Clear history ----

    #[tokio::test]
    async fn test_clear_history_keeps_log() {
        let orch = orchestrator();
        orch.process_turn("conv-1", "hello").await.unwrap();
        assert!(orch.clear_history("conv-1").unwrap());
        assert!(orch.store.history("conv-1").unwrap().is_empty());
        assert_eq!(orch.store.messages("conv-1").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_clear_history_unknown_conversation() {
        assert!(!orchestrator().clear_history("nope").unwrap());
    }
}
