//! Deterministic synthetic offer generation.
//!
//! Substituted for the HTTP providers when a live search fails so the
//! caller always has renderable data. Offers are seeded from the query
//! (route and dates), so repeating the same search yields the same
//! offers within a process run.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use wayfarer_core::types::{FlightOffer, HotelOffer};

use crate::error::ProviderError;
use crate::flights::{FlightProvider, FlightQuery};
use crate::hotels::{HotelProvider, HotelQuery};

const AIRLINES: &[(&str, &str)] = &[
    ("IndiGo", "6E"),
    ("Air India", "AI"),
    ("Emirates", "EK"),
    ("Qatar Airways", "QR"),
    ("Singapore Airlines", "SQ"),
    ("Lufthansa", "LH"),
    ("ANA", "NH"),
    ("United", "UA"),
];

const HOTEL_CHAINS: &[&str] = &[
    "Grand Plaza",
    "Riverside Inn",
    "The Meridian",
    "Palm Court Hotel",
    "Skyline Suites",
    "Harbor View Hotel",
    "The Botanica",
    "Crown Residency",
];

const AMENITIES: &[&str] = &[
    "Free WiFi",
    "Pool",
    "Spa",
    "Gym",
    "Breakfast included",
    "Airport shuttle",
    "Rooftop bar",
    "Laundry service",
];

fn seed_from<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Fabricates schema-valid flight offers.
pub struct SyntheticFlightProvider;

#[async_trait]
impl FlightProvider for SyntheticFlightProvider {
    async fn search_flights(&self, query: &FlightQuery) -> Result<Vec<FlightOffer>, ProviderError> {
        let seed = seed_from(&(
            query.origin_code.as_str(),
            query.destination_code.as_str(),
            query.departure_date,
            query.return_date,
        ));
        let mut rng = StdRng::seed_from_u64(seed);

        let mut offers = Vec::with_capacity(3);
        for _ in 0..3 {
            let (airline, prefix) = AIRLINES[rng.random_range(0..AIRLINES.len())];
            let depart_hour: u32 = rng.random_range(6..22);
            let duration_hours: i64 = rng.random_range(2..14);
            let duration_minutes: i64 = [0, 15, 30, 45][rng.random_range(0..4)];
            let stops = rng.random_range(0..=1u32);

            let mut price = rng.random_range(180.0..1400.0_f64);
            if let Some(max) = query.max_price {
                price = price.min(max);
            }
            price = (price * query.adults as f64 * 100.0).round() / 100.0;

            let arrival = query
                .departure_date
                .and_hms_opt(depart_hour, 0, 0)
                .map(|dt| dt + Duration::hours(duration_hours) + Duration::minutes(duration_minutes));

            offers.push(FlightOffer {
                id: Uuid::new_v4(),
                airline: airline.to_string(),
                flight_number: format!("{}{}", prefix, rng.random_range(100..999)),
                origin: query.origin_code.clone(),
                destination: query.destination_code.clone(),
                departure: format!("{}T{:02}:00", query.departure_date, depart_hour),
                arrival: arrival
                    .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
                    .unwrap_or_default(),
                duration: format!("{}h {:02}m", duration_hours, duration_minutes),
                stops,
                price,
                currency: "USD".to_string(),
            });
        }

        offers.sort_by(|a, b| a.price.total_cmp(&b.price));
        Ok(offers)
    }
}

/// Fabricates schema-valid hotel offers.
pub struct SyntheticHotelProvider;

#[async_trait]
impl HotelProvider for SyntheticHotelProvider {
    async fn search_hotels(&self, query: &HotelQuery) -> Result<Vec<HotelOffer>, ProviderError> {
        let seed = seed_from(&(query.city_code.as_str(), query.check_in, query.check_out));
        let mut rng = StdRng::seed_from_u64(seed);

        let mut offers = Vec::with_capacity(3);
        for _ in 0..3 {
            let name = HOTEL_CHAINS[rng.random_range(0..HOTEL_CHAINS.len())];
            let rating = (rng.random_range(3.5..4.9_f64) * 10.0).round() / 10.0;
            let price = (rng.random_range(60.0..340.0_f64) * 100.0).round() / 100.0;

            let mut amenities: Vec<String> = Vec::new();
            for amenity in AMENITIES {
                if rng.random_range(0..2) == 1 {
                    amenities.push((*amenity).to_string());
                }
            }
            if amenities.is_empty() {
                amenities.push("Free WiFi".to_string());
            }

            offers.push(HotelOffer {
                id: Uuid::new_v4(),
                name: format!("{} {}", name, query.city_code),
                rating,
                address: format!("{} district, {}", name, query.city_code),
                amenities,
                price_per_night: price,
                currency: "USD".to_string(),
            });
        }

        offers.sort_by(|a, b| a.price_per_night.total_cmp(&b.price_per_night));
        Ok(offers)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn flight_query() -> FlightQuery {
        FlightQuery {
            origin_code: "DEL".to_string(),
            destination_code: "TYO".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
            adults: 1,
            max_price: None,
        }
    }

    fn hotel_query() -> HotelQuery {
        HotelQuery {
            city_code: "TYO".to_string(),
            check_in: NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
            adults: 2,
            rooms: 1,
        }
    }

    #[tokio::test]
    async fn test_flights_always_available() {
        let offers = SyntheticFlightProvider
            .search_flights(&flight_query())
            .await
            .unwrap();
        assert_eq!(offers.len(), 3);
        for offer in &offers {
            assert!(!offer.airline.is_empty());
            assert!(!offer.flight_number.is_empty());
            assert_eq!(offer.origin, "DEL");
            assert_eq!(offer.destination, "TYO");
            assert!(offer.price > 0.0);
            assert_eq!(offer.currency, "USD");
        }
    }

    #[tokio::test]
    async fn test_flights_deterministic_for_same_query() {
        let a = SyntheticFlightProvider
            .search_flights(&flight_query())
            .await
            .unwrap();
        let b = SyntheticFlightProvider
            .search_flights(&flight_query())
            .await
            .unwrap();
        let prices_a: Vec<f64> = a.iter().map(|o| o.price).collect();
        let prices_b: Vec<f64> = b.iter().map(|o| o.price).collect();
        assert_eq!(prices_a, prices_b);
        assert_eq!(
            a.iter().map(|o| o.airline.clone()).collect::<Vec<_>>(),
            b.iter().map(|o| o.airline.clone()).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_flights_vary_by_route() {
        let a = SyntheticFlightProvider
            .search_flights(&flight_query())
            .await
            .unwrap();
        let mut other = flight_query();
        other.destination_code = "PAR".to_string();
        let b = SyntheticFlightProvider.search_flights(&other).await.unwrap();
        let prices_a: Vec<f64> = a.iter().map(|o| o.price).collect();
        let prices_b: Vec<f64> = b.iter().map(|o| o.price).collect();
        assert_ne!(prices_a, prices_b);
    }

    #[tokio::test]
    async fn test_flights_respect_max_price() {
        let mut query = flight_query();
        query.max_price = Some(200.0);
        let offers = SyntheticFlightProvider
            .search_flights(&query)
            .await
            .unwrap();
        for offer in offers {
            assert!(offer.price <= 200.0);
        }
    }

    #[tokio::test]
    async fn test_flights_sorted_by_price() {
        let offers = SyntheticFlightProvider
            .search_flights(&flight_query())
            .await
            .unwrap();
        assert!(offers.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[tokio::test]
    async fn test_hotels_always_available() {
        let offers = SyntheticHotelProvider
            .search_hotels(&hotel_query())
            .await
            .unwrap();
        assert_eq!(offers.len(), 3);
        for offer in &offers {
            assert!(!offer.name.is_empty());
            assert!(offer.rating >= 3.5 && offer.rating <= 5.0);
            assert!(!offer.amenities.is_empty());
            assert!(offer.price_per_night > 0.0);
        }
    }

    #[tokio::test]
    async fn test_hotels_deterministic_for_same_query() {
        let a = SyntheticHotelProvider
            .search_hotels(&hotel_query())
            .await
            .unwrap();
        let b = SyntheticHotelProvider
            .search_hotels(&hotel_query())
            .await
            .unwrap();
        assert_eq!(
            a.iter().map(|o| o.name.clone()).collect::<Vec<_>>(),
            b.iter().map(|o| o.name.clone()).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_hotels_sorted_by_price() {
        let offers = SyntheticHotelProvider
            .search_hotels(&hotel_query())
            .await
            .unwrap();
        assert!(offers
            .windows(2)
            .all(|w| w[0].price_per_night <= w[1].price_per_night));
    }
}
