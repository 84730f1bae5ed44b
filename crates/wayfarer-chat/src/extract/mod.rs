//! Response extraction engine.
//!
//! Mines unstructured model output (and, where the text comes up empty,
//! the user utterance) for structured travel entities. Every
//! sub-extractor is independently fallible: a miss or a provider error
//! yields that field's empty default and never blocks the others.

pub mod itinerary;
pub mod location;
pub mod structured;
pub mod weather;

use std::sync::Arc;

use uuid::Uuid;

use wayfarer_core::types::{
    AttractionItem, FoodItem, ItineraryDraft, LocationHit, TravelSession, WeatherSnapshot,
};
use wayfarer_providers::{GeocodingProvider, WeatherProvider};
use wayfarer_store::GeocodeCache;

/// Structured entities mined from one chat turn.
#[derive(Debug, Default)]
pub struct Extraction {
    pub locations: Vec<LocationHit>,
    pub itinerary: Option<ItineraryDraft>,
    pub weather: Option<WeatherSnapshot>,
    pub local_food: Vec<FoodItem>,
    pub local_attractions: Vec<AttractionItem>,
}

/// Runs all sub-extractors over one turn's text.
pub struct ExtractionEngine {
    geocoder: Arc<dyn GeocodingProvider>,
    weather: Arc<dyn WeatherProvider>,
    cache: Arc<GeocodeCache>,
    default_trip_days: u32,
}

impl ExtractionEngine {
    pub fn new(
        geocoder: Arc<dyn GeocodingProvider>,
        weather: Arc<dyn WeatherProvider>,
        cache: Arc<GeocodeCache>,
        default_trip_days: u32,
    ) -> Self {
        Self {
            geocoder,
            weather,
            cache,
            default_trip_days,
        }
    }

    /// Extract every entity type from the model text for one turn.
    pub async fn extract(
        &self,
        model_text: &str,
        utterance: &str,
        session: &TravelSession,
    ) -> Extraction {
        let locations = self.extract_locations(model_text, utterance).await;
        let itinerary =
            itinerary::extract_itinerary(model_text, utterance, self.default_trip_days);
        let weather = self.extract_weather(model_text, session).await;
        let (local_food, local_attractions) =
            structured::extract_structured(model_text, session.destination.as_deref());

        Extraction {
            locations,
            itinerary,
            weather,
            local_food,
            local_attractions,
        }
    }

    /// Geocode candidate names mined from the text, cache-aware.
    ///
    /// One candidate failing to geocode is logged and skipped; the rest
    /// still resolve.
    async fn extract_locations(&self, model_text: &str, utterance: &str) -> Vec<LocationHit> {
        let mut hits = Vec::new();
        for name in location::candidate_locations(model_text, utterance) {
            let places = match self.cache.get(&name) {
                Some(cached) => cached,
                None => match self.geocoder.search(&name).await {
                    Ok(found) => {
                        self.cache.put(&name, found.clone());
                        found
                    }
                    Err(e) => {
                        tracing::debug!(candidate = %name, error = %e, "geocoding failed; skipping");
                        continue;
                    }
                },
            };
            hits.extend(places.into_iter().map(|place| LocationHit {
                id: Uuid::new_v4(),
                name: place.display_name,
                lat: place.lat,
                lon: place.lon,
                category: if place.kind.is_empty() {
                    place.class
                } else {
                    place.kind
                },
            }));
        }
        hits
    }

    /// Resolve a weather location, then try the live forecast; fall back
    /// to the synthetic generator when the text talks about weather.
    async fn extract_weather(
        &self,
        model_text: &str,
        session: &TravelSession,
    ) -> Option<WeatherSnapshot> {
        let location = session
            .destination
            .clone()
            .or_else(|| weather::location_from_text(model_text))?;

        match self.live_forecast(&location).await {
            Some(snapshot) => Some(snapshot),
            None => {
                if weather::mentions_weather(model_text) {
                    Some(weather::synthetic_snapshot(&location))
                } else {
                    None
                }
            }
        }
    }

    async fn live_forecast(&self, location: &str) -> Option<WeatherSnapshot> {
        let places = match self.cache.get(location) {
            Some(cached) => cached,
            None => match self.geocoder.search(location).await {
                Ok(found) => {
                    self.cache.put(location, found.clone());
                    found
                }
                Err(e) => {
                    tracing::debug!(location = %location, error = %e, "weather geocoding failed");
                    return None;
                }
            },
        };
        let place = places.first()?;

        match self.weather.forecast(place.lat, place.lon, 7).await {
            Ok(forecast) => Some(weather::snapshot_from_forecast(
                location, place.lat, &forecast,
            )),
            Err(e) => {
                tracing::debug!(location = %location, error = %e, "live forecast failed");
                None
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
