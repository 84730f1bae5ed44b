//! Flight offer provider contract and HTTP adapter.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wayfarer_core::types::FlightOffer;

use crate::error::ProviderError;

/// Parameters for a round-trip flight search.
#[derive(Debug, Clone, Serialize)]
pub struct FlightQuery {
    pub origin_code: String,
    pub destination_code: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub adults: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

/// Searches round-trip flight offers.
#[async_trait]
pub trait FlightProvider: Send + Sync {
    async fn search_flights(&self, query: &FlightQuery) -> Result<Vec<FlightOffer>, ProviderError>;
}

/// IATA-style location code for a known city name (lowercase-trimmed match).
pub fn city_code(city: &str) -> Option<&'static str> {
    match city.trim().to_lowercase().as_str() {
        "tokyo" => Some("TYO"),
        "paris" => Some("PAR"),
        "london" => Some("LON"),
        "new york" => Some("NYC"),
        "dubai" => Some("DXB"),
        "bali" | "denpasar" => Some("DPS"),
        "rome" => Some("ROM"),
        "bangkok" => Some("BKK"),
        "singapore" => Some("SIN"),
        "delhi" | "new delhi" => Some("DEL"),
        "mumbai" => Some("BOM"),
        "sydney" => Some("SYD"),
        "los angeles" => Some("LAX"),
        "san francisco" => Some("SFO"),
        "barcelona" => Some("BCN"),
        "amsterdam" => Some("AMS"),
        "istanbul" => Some("IST"),
        "hong kong" => Some("HKG"),
        _ => None,
    }
}

/// HTTP flight search client.
///
/// Posts the query as JSON and expects a flat `offers` array back.
pub struct HttpFlightProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFlightProvider {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FlightSearchResponse {
    offers: Vec<WireFlightOffer>,
}

#[derive(Debug, Deserialize)]
struct WireFlightOffer {
    airline: String,
    flight_number: String,
    origin: String,
    destination: String,
    departure: String,
    arrival: String,
    duration: String,
    #[serde(default)]
    stops: u32,
    price: f64,
    #[serde(default = "default_currency")]
    currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[async_trait]
impl FlightProvider for HttpFlightProvider {
    async fn search_flights(&self, query: &FlightQuery) -> Result<Vec<FlightOffer>, ProviderError> {
        let response = self.client.post(&self.base_url).json(query).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let body: FlightSearchResponse = response.json().await?;
        if body.offers.is_empty() {
            return Err(ProviderError::NoResult(format!(
                "{}-{}",
                query.origin_code, query.destination_code
            )));
        }

        Ok(body
            .offers
            .into_iter()
            .map(|offer| FlightOffer {
                id: Uuid::new_v4(),
                airline: offer.airline,
                flight_number: offer.flight_number,
                origin: offer.origin,
                destination: offer.destination,
                departure: offer.departure,
                arrival: offer.arrival,
                duration: offer.duration,
                stops: offer.stops,
                price: offer.price,
                currency: offer.currency,
            })
            .collect())
    }
}

// =============================================================================
// Tests
// =============================================================================
