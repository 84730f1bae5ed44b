//! Wayfarer application binary - composition root.
//!
//! Ties the crates together into a single executable:
//! 1. Load configuration from TOML
//! 2. Wire the HTTP data providers and the in-memory store
//! 3. Build the chat turn pipeline (parser -> model -> extraction -> enrichment)
//! 4. Start the axum REST API server

use std::path::PathBuf;
use std::sync::Arc;

use wayfarer_api::{create_router, AppState};
use wayfarer_chat::{
    Enricher, ExtractionEngine, HttpCompletionProvider, ModelClient, SessionParser,
    TurnOrchestrator,
};
use wayfarer_core::WayfarerConfig;
use wayfarer_providers::{
    HttpFlightProvider, HttpHotelProvider, HttpWeatherProvider, NominatimGeocoder,
};
use wayfarer_store::{GeocodeCache, SessionStore};

/// Resolve the config file path (WAYFARER_CONFIG env, or ~/.wayfarer/config.toml).
fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("WAYFARER_CONFIG") {
        return PathBuf::from(path);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".wayfarer").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Wayfarer v{}", env!("CARGO_PKG_VERSION"));

    // Config.
    let config_file = config_path();
    let config = WayfarerConfig::load_or_default(&config_file);
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Store.
    let store = Arc::new(SessionStore::new(config.chat.history_window));

    // Providers.
    let timeout = config.providers.timeout_secs;
    let geocoder = Arc::new(NominatimGeocoder::new(
        config.providers.geocoding_url.clone(),
        timeout,
    ));
    let weather = Arc::new(HttpWeatherProvider::new(
        config.providers.weather_url.clone(),
        timeout,
    ));
    let flights = Arc::new(HttpFlightProvider::new(
        config.providers.flight_url.clone(),
        timeout,
    ));
    let hotels = Arc::new(HttpHotelProvider::new(
        config.providers.hotel_url.clone(),
        timeout,
    ));

    // Chat pipeline.
    let engine = ExtractionEngine::new(
        geocoder,
        weather,
        Arc::new(GeocodeCache::new()),
        config.chat.default_trip_days,
    );
    let enricher = Enricher::new(flights, hotels, config.providers.synthetic_fallback);
    let model = ModelClient::new(Box::new(HttpCompletionProvider::from_config(&config.model)));
    let orchestrator = Arc::new(TurnOrchestrator::new(
        SessionParser::new(config.chat.booking_horizon_days),
        model,
        engine,
        enricher,
        Arc::clone(&store),
        config.chat.max_message_length,
    ));
    tracing::info!("Chat pipeline ready");

    // API server.
    let port = config.general.port;
    let addr = format!("127.0.0.1:{}", port);
    let state = AppState::new(config, orchestrator, store);
    let router = create_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "Failed to bind — is another instance running?");
            return Err(e.into());
        }
    };

    tracing::info!(addr = %addr, "API server listening");

    axum::serve(listener, router).await?;

    Ok(())
}
