//! Flight and hotel enrichment for bookable sessions.
//!
//! Runs only once a session knows origin, destination, and both dates.
//! The two searches are issued concurrently and joined; any failure
//! degrades silently, and with the synthetic fallback enabled a
//! provider failure is replaced by fabricated schema-valid offers so
//! callers always have renderable data.

use std::sync::Arc;

use wayfarer_core::types::{FlightOffer, HotelOffer, TravelSession};
use wayfarer_providers::{
    city_code, FlightProvider, FlightQuery, HotelProvider, HotelQuery, SyntheticFlightProvider,
    SyntheticHotelProvider,
};

/// Attaches flight and hotel offers to complete sessions.
pub struct Enricher {
    flights: Arc<dyn FlightProvider>,
    hotels: Arc<dyn HotelProvider>,
    synthetic_fallback: bool,
}

impl Enricher {
    pub fn new(
        flights: Arc<dyn FlightProvider>,
        hotels: Arc<dyn HotelProvider>,
        synthetic_fallback: bool,
    ) -> Self {
        Self {
            flights,
            hotels,
            synthetic_fallback,
        }
    }

    /// Search offers for a session; empty results when the session is
    /// not bookable or a lookup degrades without fallback.
    pub async fn enrich(&self, session: &TravelSession) -> (Vec<FlightOffer>, Vec<HotelOffer>) {
        if !session.is_bookable() {
            return (Vec::new(), Vec::new());
        }
        // is_bookable guarantees these fields.
        let (Some(origin), Some(destination), Some(departure), Some(ret)) = (
            session.origin.as_deref(),
            session.destination.as_deref(),
            session.departure_date,
            session.return_date,
        ) else {
            return (Vec::new(), Vec::new());
        };

        let (Some(origin_code), Some(destination_code)) =
            (city_code(origin), city_code(destination))
        else {
            tracing::debug!(origin, destination, "no location code; skipping enrichment");
            return (Vec::new(), Vec::new());
        };

        let flight_query = FlightQuery {
            origin_code: origin_code.to_string(),
            destination_code: destination_code.to_string(),
            departure_date: departure,
            return_date: ret,
            adults: session.travelers,
            max_price: session.budget,
        };
        let hotel_query = HotelQuery {
            city_code: destination_code.to_string(),
            check_in: departure,
            check_out: ret,
            adults: session.travelers,
            rooms: 1,
        };

        let (flight_result, hotel_result) = tokio::join!(
            self.flights.search_flights(&flight_query),
            self.hotels.search_hotels(&hotel_query),
        );

        let flights = match flight_result {
            Ok(offers) => offers,
            Err(e) => {
                tracing::warn!(error = %e, "flight search failed");
                if self.synthetic_fallback {
                    SyntheticFlightProvider
                        .search_flights(&flight_query)
                        .await
                        .unwrap_or_default()
                } else {
                    Vec::new()
                }
            }
        };

        let hotels = match hotel_result {
            Ok(offers) => offers,
            Err(e) => {
                tracing::warn!(error = %e, "hotel search failed");
                if self.synthetic_fallback {
                    SyntheticHotelProvider
                        .search_hotels(&hotel_query)
                        .await
                        .unwrap_or_default()
                } else {
                    Vec::new()
                }
            }
        };

        (flights, hotels)
    }
}

// =============================================================================
// Tests
// =============================================================================
