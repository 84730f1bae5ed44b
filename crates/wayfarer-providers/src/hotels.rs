//! Hotel offer provider contract and HTTP adapter.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wayfarer_core::types::HotelOffer;

use crate::error::ProviderError;

/// Parameters for a hotel search in one city.
#[derive(Debug, Clone, Serialize)]
pub struct HotelQuery {
    pub city_code: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub rooms: u32,
}

/// Searches hotel offers.
#[async_trait]
pub trait HotelProvider: Send + Sync {
    async fn search_hotels(&self, query: &HotelQuery) -> Result<Vec<HotelOffer>, ProviderError>;
}

/// HTTP hotel search client.
pub struct HttpHotelProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpHotelProvider {
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
struct HotelSearchResponse {
    offers: Vec<WireHotelOffer>,
}

#[derive(Debug, Deserialize)]
struct WireHotelOffer {
    name: String,
    rating: f64,
    address: String,
    #[serde(default)]
    amenities: Vec<String>,
    price_per_night: f64,
    #[serde(default = "default_currency")]
    currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[async_trait]
impl HotelProvider for HttpHotelProvider {
    async fn search_hotels(&self, query: &HotelQuery) -> Result<Vec<HotelOffer>, ProviderError> {
        let response = self.client.post(&self.base_url).json(query).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let body: HotelSearchResponse = response.json().await?;
        if body.offers.is_empty() {
            return Err(ProviderError::NoResult(query.city_code.clone()));
        }

        Ok(body
            .offers
            .into_iter()
            .map(|offer| HotelOffer {
                id: Uuid::new_v4(),
                name: offer.name,
                rating: offer.rating,
                address: offer.address,
                amenities: offer.amenities,
                price_per_night: offer.price_per_night,
                currency: offer.currency,
            })
            .collect())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotel_query_serializes() {
        let query = HotelQuery {
            city_code: "TYO".to_string(),
            check_in: NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
            adults: 2,
            rooms: 1,
        };
        let json = serde_json::to_string(&query).unwrap();
        assert!(json.contains("\"city_code\":\"TYO\""));
        assert!(json.contains("\"check_in\":\"2026-09-04\""));
    }

    #[test]
    fn test_wire_offer_defaults() {
        let json = r#"{
            "name": "Grand Palace Hotel",
            "rating": 4.5,
            "address": "1-1 Marunouchi, Tokyo",
            "price_per_night": 180.0
        }"#;
        let offer: WireHotelOffer = serde_json::from_str(json).unwrap();
        assert!(offer.amenities.is_empty());
        assert_eq!(offer.currency, "USD");
    }

    #[tokio::test]
    async fn test_search_unreachable_host_errors() {
        let provider = HttpHotelProvider::new("http://127.0.0.1:1/hotels", 1);
        let query = HotelQuery {
            city_code: "TYO".to_string(),
            check_in: NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
            adults: 1,
            rooms: 1,
        };
        assert!(provider.search_hotels(&query).await.is_err());
    }
}
