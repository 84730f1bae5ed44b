//! Trip parameter extraction from user utterances.
//!
//! Applies an ordered list of independent pattern rules against each
//! utterance and proposes field values as a [`SessionDelta`]. The caller
//! merges the delta with first-write-wins semantics, so a rule never
//! needs to know what the session already holds. Absence of a match is
//! an expected negative, never an error.

use chrono::{Duration, NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;

use wayfarer_core::types::SessionDelta;

/// Fixed approximate conversion rate; no live FX lookup.
const INR_PER_USD: f64 = 83.0;

// =============================================================================
// Compiled pattern rules (compiled once, reused across calls)
// =============================================================================

// "from Delhi to ..." / "in Delhi and ..."
static ORIGIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:from|in)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})\s+(?i:to|and)\b").unwrap()
});

// "trip to Tokyo", "visit New York with ...", "plan Paris for ..."
static DESTINATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?i:to|visit|plan)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})(?:\s+(?i:for|from|with|on|in)\b|\s*[.,!?;]|\s*$)",
    )
    .unwrap()
});

// "3 day trip", "a 5-day itinerary"
static TRIP_DAYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})\s*(?:-\s*)?days?\b").unwrap());

// "₹83,000", "Rs 50000", "INR 20,000"
static BUDGET_INR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:₹|\brs\.?|\binr\b)\s*([0-9][0-9,]*(?:\.[0-9]+)?)").unwrap()
});

// "$500", "1200 USD", "800 dollars"
static BUDGET_USD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\$\s*([0-9][0-9,]*(?:\.[0-9]+)?))|(?i:\b([0-9][0-9,]*(?:\.[0-9]+)?)\s*(?:usd|dollars)\b)")
        .unwrap()
});

// "4 people", "2 adults", "three of us" is out of scope: digits only
static TRAVELERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s*(?:people|persons|travellers|travelers|adults|of\s+us|pax)\b")
        .unwrap()
});

// =============================================================================
// SessionParser
// =============================================================================

/// Rule-based extractor of trip parameters from raw utterances.
pub struct SessionParser {
    /// Days from now to place the departure when the user gives a trip
    /// length but no dates.
    pub booking_horizon_days: i64,
}

impl SessionParser {
    pub fn new(booking_horizon_days: i64) -> Self {
        Self {
            booking_horizon_days,
        }
    }

    /// Propose session fields mentioned in the utterance.
    ///
    /// Pure with respect to the session: the returned delta carries only
    /// what this utterance mentioned and the caller merges it.
    pub fn parse(&self, utterance: &str) -> SessionDelta {
        let mut delta = SessionDelta::default();

        delta.origin = self.extract_origin(utterance);
        delta.destination = self.extract_destination(utterance);

        if let Some(days) = self.extract_trip_days(utterance) {
            let departure = Utc::now().date_naive() + Duration::days(self.booking_horizon_days);
            delta.departure_date = Some(departure);
            delta.return_date = Some(departure + Duration::days(i64::from(days)));
        }

        if let Some(budget) = self.extract_budget(utterance) {
            delta.budget = Some(budget);
            delta.currency = Some("USD".to_string());
        }

        delta.travelers = self.extract_travelers(utterance);

        delta
    }

    fn extract_origin(&self, utterance: &str) -> Option<String> {
        ORIGIN_RE
            .captures(utterance)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }

    fn extract_destination(&self, utterance: &str) -> Option<String> {
        DESTINATION_RE
            .captures(utterance)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }

    /// Trip length in days, when the utterance names one.
    pub fn extract_trip_days(&self, utterance: &str) -> Option<u32> {
        TRIP_DAYS_RE
            .captures(utterance)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .filter(|days| *days > 0)
    }

    /// Budget normalized to USD. INR takes precedence when both match.
    fn extract_budget(&self, utterance: &str) -> Option<f64> {
        if let Some(caps) = BUDGET_INR_RE.captures(utterance) {
            let amount = parse_amount(caps.get(1)?.as_str())?;
            return Some(round2(amount / INR_PER_USD));
        }
        if let Some(caps) = BUDGET_USD_RE.captures(utterance) {
            let matched = caps.get(1).or_else(|| caps.get(2))?;
            return Some(round2(parse_amount(matched.as_str())?));
        }
        None
    }

    fn extract_travelers(&self, utterance: &str) -> Option<u32> {
        TRAVELERS_RE
            .captures(utterance)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .filter(|count| *count > 0)
    }

    /// Synthetic departure date used when only a trip length is known.
    pub fn default_departure(&self) -> NaiveDate {
        Utc::now().date_naive() + Duration::days(self.booking_horizon_days)
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =============================================================================
// Tests
// =============================================================================
