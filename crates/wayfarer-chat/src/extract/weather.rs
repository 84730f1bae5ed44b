//! Weather fact mining and the synthetic forecast fallback.
//!
//! Location resolution prefers the session destination, then scans the
//! model text. The live forecast path runs first; when it fails and the
//! text actually talks about weather, a deterministic table keyed by
//! well-known city names produces plausible values instead. The
//! synthetic path maps months to seasons Northern-hemisphere style
//! only; the live path flips by latitude sign.

use chrono::{Datelike, Utc};
use regex::Regex;
use std::sync::LazyLock;

use wayfarer_core::types::WeatherSnapshot;
use wayfarer_providers::Forecast;

// "weather in Tokyo"
static WEATHER_IN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:weather\s+in)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})").unwrap()
});

// "in Tokyo is ...", "at Paris ranges ..."
static IN_AT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:in|at)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})\s+(?i:is|ranges|averages)\b")
        .unwrap()
});

// "Tokyo's weather", "Paris's climate"
static POSSESSIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})'s\s+(?i:weather|climate|temperatures)\b")
        .unwrap()
});

const WEATHER_KEYWORDS: &[&str] = &[
    "weather",
    "temperature",
    "climate",
    "forecast",
    "rain",
    "sunny",
    "humid",
    "snow",
];

/// Location named by weather phrasing in the model text.
pub fn location_from_text(model_text: &str) -> Option<String> {
    for re in [&*WEATHER_IN_RE, &*IN_AT_RE, &*POSSESSIVE_RE] {
        if let Some(caps) = re.captures(model_text) {
            if let Some(m) = caps.get(1) {
                return Some(m.as_str().trim().to_string());
            }
        }
    }
    None
}

/// Whether the text talks about weather at all.
pub fn mentions_weather(text: &str) -> bool {
    let lower = text.to_lowercase();
    WEATHER_KEYWORDS.iter().any(|k| lower.contains(k))
}

// =============================================================================
// Live forecast aggregation
// =============================================================================

/// Aggregate a provider forecast into a snapshot.
pub fn snapshot_from_forecast(location: &str, lat: f64, forecast: &Forecast) -> WeatherSnapshot {
    let temp_min = forecast
        .days
        .iter()
        .map(|d| d.temp_min)
        .fold(f64::INFINITY, f64::min);
    let temp_max = forecast
        .days
        .iter()
        .map(|d| d.temp_max)
        .fold(f64::NEG_INFINITY, f64::max);
    let temp_avg = if forecast.days.is_empty() {
        forecast.current_temp
    } else {
        let sum: f64 = forecast
            .days
            .iter()
            .map(|d| (d.temp_min + d.temp_max) / 2.0)
            .sum();
        round1(sum / forecast.days.len() as f64)
    };

    WeatherSnapshot {
        location: location.to_string(),
        temp_avg,
        temp_min,
        temp_max,
        conditions: forecast.current_conditions.clone(),
        season: season_for(lat, Utc::now().month()).to_string(),
        icon: forecast.current_icon.clone(),
    }
}

/// Season from latitude sign and month.
pub fn season_for(lat: f64, month: u32) -> &'static str {
    let northern = northern_season(month);
    if lat >= 0.0 {
        northern
    } else {
        match northern {
            "winter" => "summer",
            "spring" => "autumn",
            "summer" => "winter",
            _ => "spring",
        }
    }
}

fn northern_season(month: u32) -> &'static str {
    match month {
        12 | 1 | 2 => "winter",
        3..=5 => "spring",
        6..=8 => "summer",
        _ => "autumn",
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// =============================================================================
// Synthetic fallback
// =============================================================================

/// Per-season (min, max, conditions, icon), indexed winter..autumn.
type SeasonTable = [(f64, f64, &'static str, &'static str); 4];

static CITY_SEASONS: &[(&str, SeasonTable)] = &[
    (
        "tokyo",
        [
            (2.0, 12.0, "Clear and crisp", "sunny"),
            (10.0, 19.0, "Mild with light showers", "partly-cloudy"),
            (23.0, 31.0, "Hot and humid", "rain"),
            (15.0, 23.0, "Comfortable and clear", "partly-cloudy"),
        ],
    ),
    (
        "paris",
        [
            (2.0, 8.0, "Grey and drizzly", "cloudy"),
            (8.0, 16.0, "Mild with scattered showers", "partly-cloudy"),
            (16.0, 26.0, "Warm and bright", "sunny"),
            (9.0, 16.0, "Cool and overcast", "cloudy"),
        ],
    ),
    (
        "london",
        [
            (3.0, 9.0, "Cold and damp", "rain"),
            (7.0, 15.0, "Changeable with showers", "partly-cloudy"),
            (14.0, 23.0, "Pleasant with long evenings", "partly-cloudy"),
            (8.0, 15.0, "Misty and cool", "fog"),
        ],
    ),
    (
        "new york",
        [
            (-3.0, 5.0, "Cold with snow spells", "snow"),
            (7.0, 18.0, "Fresh and breezy", "partly-cloudy"),
            (20.0, 30.0, "Hot and muggy", "sunny"),
            (9.0, 18.0, "Crisp and clear", "sunny"),
        ],
    ),
    (
        "dubai",
        [
            (15.0, 25.0, "Warm and sunny", "sunny"),
            (21.0, 34.0, "Hot and dry", "sunny"),
            (30.0, 42.0, "Very hot", "sunny"),
            (22.0, 35.0, "Hot and clear", "sunny"),
        ],
    ),
    (
        "bali",
        [
            (24.0, 31.0, "Humid with tropical rain", "rain"),
            (24.0, 32.0, "Warm with passing showers", "partly-cloudy"),
            (23.0, 30.0, "Dry and sunny", "sunny"),
            (24.0, 31.0, "Warm and mostly dry", "partly-cloudy"),
        ],
    ),
    (
        "rome",
        [
            (4.0, 12.0, "Mild and changeable", "partly-cloudy"),
            (9.0, 19.0, "Sunny with cool mornings", "sunny"),
            (20.0, 31.0, "Hot and dry", "sunny"),
            (11.0, 21.0, "Warm with autumn rain", "rain"),
        ],
    ),
    (
        "bangkok",
        [
            (22.0, 32.0, "Warm and dry", "sunny"),
            (26.0, 35.0, "Very hot", "sunny"),
            (25.0, 33.0, "Humid with monsoon rain", "rain"),
            (24.0, 32.0, "Warm with late rains", "partly-cloudy"),
        ],
    ),
];

/// Generic table for cities the fallback does not know.
static GENERIC_SEASONS: SeasonTable = [
    (5.0, 13.0, "Cool and quiet", "cloudy"),
    (12.0, 20.0, "Mild and fresh", "partly-cloudy"),
    (20.0, 29.0, "Warm and bright", "sunny"),
    (10.0, 18.0, "Cool and breezy", "partly-cloudy"),
];

fn season_index(month: u32) -> usize {
    match northern_season(month) {
        "winter" => 0,
        "spring" => 1,
        "summer" => 2,
        _ => 3,
    }
}

/// Deterministic plausible weather for a location.
///
/// Northern-hemisphere month mapping only; no hemisphere detection on
/// this path.
pub fn synthetic_snapshot(location: &str) -> WeatherSnapshot {
    let month = Utc::now().month();
    let index = season_index(month);
    let key = location.trim().to_lowercase();

    let table = CITY_SEASONS
        .iter()
        .find(|(city, _)| key.contains(city))
        .map(|(_, table)| table)
        .unwrap_or(&GENERIC_SEASONS);
    let (min, max, conditions, icon) = table[index];

    WeatherSnapshot {
        location: location.to_string(),
        temp_avg: round1((min + max) / 2.0),
        temp_min: min,
        temp_max: max,
        conditions: conditions.to_string(),
        season: northern_season(month).to_string(),
        icon: icon.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================
