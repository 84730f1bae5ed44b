//! Domain types shared across the Wayfarer crates.
//!
//! Travel sessions accumulate trip parameters across a conversation;
//! entity types carry the structured travel data mined out of model
//! output. Entities are immutable once constructed and carry generated
//! unique ids.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Conversation
// =============================================================================

/// Role of a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Wire name used by chat-completion APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One entry in the bounded conversation window sent to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: Role,
    pub content: String,
}

impl ConversationEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A message in the append-only log. Never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: Uuid,
    pub user_id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Travel session
// =============================================================================

/// Accumulated trip parameters for one conversation.
///
/// Fields set from user text are never overwritten by a later
/// re-extraction; merging goes through [`TravelSession::apply`], which
/// enforces first-write-wins per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelSession {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    /// Budget normalized to `currency`.
    pub budget: Option<f64>,
    pub currency: String,
    pub travelers: u32,
    pub flight_options: Vec<FlightOffer>,
    pub hotel_options: Vec<HotelOffer>,
    pub weather_info: Option<WeatherSnapshot>,
}

impl Default for TravelSession {
    fn default() -> Self {
        Self {
            origin: None,
            destination: None,
            departure_date: None,
            return_date: None,
            budget: None,
            currency: "USD".to_string(),
            travelers: 1,
            flight_options: Vec::new(),
            hotel_options: Vec::new(),
            weather_info: None,
        }
    }
}

impl TravelSession {
    /// Merge a parser-proposed delta into the session.
    ///
    /// First write wins per field: a proposal only lands if the field is
    /// currently unset (or still the travelers default of 1).
    pub fn apply(&mut self, delta: &SessionDelta) {
        if self.origin.is_none() {
            if let Some(ref origin) = delta.origin {
                self.origin = Some(origin.clone());
            }
        }
        if self.destination.is_none() {
            if let Some(ref destination) = delta.destination {
                self.destination = Some(destination.clone());
            }
        }
        if self.departure_date.is_none() {
            self.departure_date = delta.departure_date;
        }
        if self.return_date.is_none() {
            self.return_date = delta.return_date;
        }
        if self.budget.is_none() {
            if let Some(budget) = delta.budget {
                self.budget = Some(budget);
                if let Some(ref currency) = delta.currency {
                    self.currency = currency.clone();
                }
            }
        }
        if self.travelers == 1 {
            if let Some(travelers) = delta.travelers {
                self.travelers = travelers;
            }
        }
    }

    /// True when origin, destination, and both dates are known, so
    /// flight and hotel enrichment can run.
    pub fn is_bookable(&self) -> bool {
        self.origin.is_some()
            && self.destination.is_some()
            && self.departure_date.is_some()
            && self.return_date.is_some()
    }
}

/// Fields the intent extractor proposes for a session.
///
/// Only the fields the utterance actually mentioned are populated; the
/// caller merges via [`TravelSession::apply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionDelta {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub currency: Option<String>,
    pub travelers: Option<u32>,
}

impl SessionDelta {
    pub fn is_empty(&self) -> bool {
        self.origin.is_none()
            && self.destination.is_none()
            && self.departure_date.is_none()
            && self.return_date.is_none()
            && self.budget.is_none()
            && self.travelers.is_none()
    }
}

// =============================================================================
// Extracted entities
// =============================================================================

/// A geocoded place mined from model output or the user utterance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationHit {
    pub id: Uuid,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub category: String,
}

/// A single timed activity within an itinerary day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub time: String,
    pub description: String,
}

/// One day of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: u32,
    pub title: String,
    pub activities: Vec<Activity>,
}

/// A structured itinerary mined from model output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryDraft {
    pub id: Uuid,
    pub title: String,
    pub destination: String,
    pub days: Vec<ItineraryDay>,
}

/// Weather facts for a location, live or synthetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: String,
    pub temp_avg: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub conditions: String,
    pub season: String,
    pub icon: String,
}

/// A local dish or food recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub price: String,
    pub description: String,
    pub location: String,
    pub image_url: String,
}

/// A sight or attraction recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttractionItem {
    pub id: Uuid,
    pub name: String,
    pub price: String,
    pub description: String,
    pub location: String,
    pub duration: String,
    pub image_url: String,
}

/// One geocoding result for a place-name query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPlace {
    pub id: i64,
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    pub class: String,
    pub kind: String,
}

// =============================================================================
// Provider offers
// =============================================================================

/// A flight offer from a provider or the synthetic fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub id: Uuid,
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
    pub stops: u32,
    pub price: f64,
    pub currency: String,
}

/// A hotel offer from a provider or the synthetic fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOffer {
    pub id: Uuid,
    pub name: String,
    pub rating: f64,
    pub address: String,
    pub amenities: Vec<String>,
    pub price_per_night: f64,
    pub currency: String,
}

// =============================================================================
// Turn outcome
// =============================================================================

/// Everything one chat turn produces for the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub reply_text: String,
    pub locations: Vec<LocationHit>,
    pub itinerary: Option<ItineraryDraft>,
    pub weather: Option<WeatherSnapshot>,
    pub local_food: Vec<FoodItem>,
    pub local_attractions: Vec<AttractionItem>,
    pub session: TravelSession,
}

// =============================================================================
// Tests
// =============================================================================
