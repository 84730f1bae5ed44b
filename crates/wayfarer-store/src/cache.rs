//! Process-memory geocode cache.
//!
//! Keyed by the lowercase-trimmed query string; entries live for the
//! process lifetime. Negative results (empty vectors) are cached too, so
//! a name that geocodes to nothing is not retried every turn.

use std::collections::HashMap;
use std::sync::Mutex;

use wayfarer_core::types::GeoPlace;

/// Indefinite in-memory cache of geocoding lookups.
pub struct GeocodeCache {
    entries: Mutex<HashMap<String, Vec<GeoPlace>>>,
}

impl GeocodeCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn key(query: &str) -> String {
        query.trim().to_lowercase()
    }

    /// Cached results for a query, if present.
    pub fn get(&self, query: &str) -> Option<Vec<GeoPlace>> {
        let entries = self.entries.lock().ok()?;
        entries.get(&Self::key(query)).cloned()
    }

    /// Store results for a query.
    pub fn put(&self, query: &str, results: Vec<GeoPlace>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(Self::key(query), results);
        }
    }

    /// Number of cached queries.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GeocodeCache {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
