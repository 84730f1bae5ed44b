//! Weather provider contract and Open-Meteo HTTP adapter.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ProviderError;

/// A multi-day forecast for one set of coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub current_temp: f64,
    pub current_conditions: String,
    pub current_icon: String,
    pub days: Vec<ForecastDay>,
}

/// One forecast day.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: String,
    pub temp_min: f64,
    pub temp_max: f64,
    pub conditions: String,
}

/// Fetches a forecast for geocoded coordinates.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn forecast(&self, lat: f64, lon: f64, days: u32) -> Result<Forecast, ProviderError>;
}

/// Human-readable conditions and an icon name for a WMO weather code.
pub fn describe_weather_code(code: u32) -> (&'static str, &'static str) {
    match code {
        0 => ("Clear sky", "sunny"),
        1..=2 => ("Partly cloudy", "partly-cloudy"),
        3 => ("Overcast", "cloudy"),
        45 | 48 => ("Foggy", "fog"),
        51..=57 => ("Drizzle", "drizzle"),
        61..=67 => ("Rainy", "rain"),
        71..=77 => ("Snowy", "snow"),
        80..=82 => ("Rain showers", "rain"),
        85..=86 => ("Snow showers", "snow"),
        95..=99 => ("Thunderstorm", "thunderstorm"),
        _ => ("Mixed conditions", "partly-cloudy"),
    }
}

/// Open-Meteo-compatible forecast client.
pub struct HttpWeatherProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWeatherProvider {
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
struct OpenMeteoResponse {
    current: OpenMeteoCurrent,
    daily: OpenMeteoDaily,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    temperature_2m: f64,
    weather_code: u32,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoDaily {
    time: Vec<String>,
    temperature_2m_min: Vec<f64>,
    temperature_2m_max: Vec<f64>,
    weather_code: Vec<u32>,
}

#[async_trait]
impl WeatherProvider for HttpWeatherProvider {
    async fn forecast(&self, lat: f64, lon: f64, days: u32) -> Result<Forecast, ProviderError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("forecast_days", days.to_string()),
                ("current", "temperature_2m,weather_code".to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,weather_code".to_string(),
                ),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let body: OpenMeteoResponse = response.json().await?;
        let (current_conditions, current_icon) = describe_weather_code(body.current.weather_code);

        let count = body
            .daily
            .time
            .len()
            .min(body.daily.temperature_2m_min.len())
            .min(body.daily.temperature_2m_max.len());
        let mut forecast_days = Vec::with_capacity(count);
        for i in 0..count {
            let code = body.daily.weather_code.get(i).copied().unwrap_or(0);
            forecast_days.push(ForecastDay {
                date: body.daily.time[i].clone(),
                temp_min: body.daily.temperature_2m_min[i],
                temp_max: body.daily.temperature_2m_max[i],
                conditions: describe_weather_code(code).0.to_string(),
            });
        }

        if forecast_days.is_empty() {
            return Err(ProviderError::NoResult(format!("{},{}", lat, lon)));
        }

        Ok(Forecast {
            current_temp: body.current.temperature_2m,
            current_conditions: current_conditions.to_string(),
            current_icon: current_icon.to_string(),
            days: forecast_days,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_weather_code_known() {
        assert_eq!(describe_weather_code(0).0, "Clear sky");
        assert_eq!(describe_weather_code(2).0, "Partly cloudy");
        assert_eq!(describe_weather_code(3).0, "Overcast");
        assert_eq!(describe_weather_code(61).0, "Rainy");
        assert_eq!(describe_weather_code(75).1, "snow");
        assert_eq!(describe_weather_code(95).1, "thunderstorm");
    }

    #[test]
    fn test_describe_weather_code_unknown_falls_back() {
        assert_eq!(describe_weather_code(42).0, "Mixed conditions");
    }

    #[test]
    fn test_open_meteo_response_deserializes() {
        let json = r#"{
            "current": {"temperature_2m": 21.4, "weather_code": 2},
            "daily": {
                "time": ["2026-09-04", "2026-09-05"],
                "temperature_2m_min": [17.0, 16.2],
                "temperature_2m_max": [25.5, 24.8],
                "weather_code": [2, 61]
            }
        }"#;
        let body: OpenMeteoResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.current.weather_code, 2);
        assert_eq!(body.daily.time.len(), 2);
        assert_eq!(body.daily.temperature_2m_max[1], 24.8);
    }

    #[tokio::test]
    async fn test_forecast_unreachable_host_errors() {
        let provider = HttpWeatherProvider::new("http://127.0.0.1:1/forecast", 1);
        assert!(provider.forecast(35.6, 139.7, 3).await.is_err());
    }
}
