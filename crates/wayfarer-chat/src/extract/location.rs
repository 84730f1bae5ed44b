//! Place-name candidate mining.
//!
//! Scans model text for apposition patterns first; when the text names
//! no places that way, falls back to trip-intent phrasing in the user
//! utterance. Candidates are deduplicated and capped before geocoding
//! to bound downstream lookups.

use regex::Regex;
use std::sync::LazyLock;

/// Most candidates forwarded to geocoding per turn.
const MAX_CANDIDATES: usize = 3;

// "Kyoto is located in ...", "Osaka, a city in ...", "Tokyo, the capital of ..."
static APPOSITION_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})\s+is\s+located\s+(?:at|in)\b").unwrap(),
        Regex::new(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3}),\s+a\s+city\s+in\b").unwrap(),
        Regex::new(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3}),\s+the\s+capital\s+of\b").unwrap(),
    ]
});

// "trip to Tokyo", "visit Kyoto", "in Paris"
static TRIP_INTENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:in|visit|(?:plan\s+a\s+)?trip\s+to)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})")
        .unwrap()
});

/// Candidate place names for geocoding, deduplicated and capped.
pub fn candidate_locations(model_text: &str, utterance: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    for re in APPOSITION_RES.iter() {
        for caps in re.captures_iter(model_text) {
            if let Some(m) = caps.get(1) {
                push_unique(&mut candidates, m.as_str());
            }
        }
    }

    if candidates.is_empty() {
        for caps in TRIP_INTENT_RE.captures_iter(utterance) {
            if let Some(m) = caps.get(1) {
                push_unique(&mut candidates, m.as_str());
            }
        }
    }

    candidates.truncate(MAX_CANDIDATES);
    candidates
}

fn push_unique(candidates: &mut Vec<String>, raw: &str) {
    let name = raw.trim();
    if name.is_empty() {
        return;
    }
    let normalized = name.to_lowercase();
    if !candidates.iter().any(|c| c.to_lowercase() == normalized) {
        candidates.push(name.to_string());
    }
}

// =============================================================================
// Tests
// =============================================================================
