//! External data collaborators for the Wayfarer backend.
//!
//! Each provider concern (geocoding, weather, flights, hotels) is an
//! async trait with an HTTP adapter and, where the design calls for it,
//! a deterministic synthetic implementation substituted on failure.

pub mod error;
pub mod flights;
pub mod geocoding;
pub mod hotels;
pub mod synthetic;
pub mod weather;

pub use error::ProviderError;
pub use flights::{city_code, FlightProvider, FlightQuery, HttpFlightProvider};
pub use geocoding::{GeocodingProvider, NominatimGeocoder};
pub use hotels::{HotelProvider, HotelQuery, HttpHotelProvider};
pub use synthetic::{SyntheticFlightProvider, SyntheticHotelProvider};
pub use weather::{Forecast, ForecastDay, HttpWeatherProvider, WeatherProvider};
