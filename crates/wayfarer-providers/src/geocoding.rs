//! Geocoding provider contract and Nominatim HTTP adapter.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use wayfarer_core::types::GeoPlace;

use crate::error::ProviderError;

/// Resolves a free-text place name to candidate places.
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    async fn search(&self, name: &str) -> Result<Vec<GeoPlace>, ProviderError>;
}

/// Nominatim-compatible geocoder.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("wayfarer/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

/// Nominatim returns lat/lon as strings.
#[derive(Debug, Deserialize)]
struct NominatimHit {
    place_id: i64,
    display_name: String,
    lat: String,
    lon: String,
    #[serde(default)]
    class: String,
    #[serde(default, rename = "type")]
    kind: String,
}

#[async_trait]
impl GeocodingProvider for NominatimGeocoder {
    async fn search(&self, name: &str) -> Result<Vec<GeoPlace>, ProviderError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", name), ("format", "jsonv2"), ("limit", "3")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let hits: Vec<NominatimHit> = response.json().await?;
        hits.into_iter()
            .map(|hit| {
                let lat = hit
                    .lat
                    .parse::<f64>()
                    .map_err(|e| ProviderError::Decode(format!("lat: {}", e)))?;
                let lon = hit
                    .lon
                    .parse::<f64>()
                    .map_err(|e| ProviderError::Decode(format!("lon: {}", e)))?;
                Ok(GeoPlace {
                    id: hit.place_id,
                    display_name: hit.display_name,
                    lat,
                    lon,
                    class: hit.class,
                    kind: hit.kind,
                })
            })
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
