//! Route handler functions for all API endpoints.
//!
//! Each handler extracts query/body parameters via axum extractors,
//! drives the orchestrator or store, and returns JSON responses.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wayfarer_core::types::{ItineraryDay, ItineraryDraft, StoredMessage, TravelSession, TurnOutcome};

use crate::error::ApiError;
use crate::state::AppState;

/// Conversation identity used when the caller supplies none.
const DEFAULT_CONVERSATION: &str = "default";

// =============================================================================
// Request and response types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub conversation_id: String,
    #[serde(flatten)]
    pub outcome: TurnOutcome,
}

#[derive(Debug, Deserialize)]
pub struct ConversationParams {
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<StoredMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ClearHistoryRequest {
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct SaveItineraryRequest {
    pub title: String,
    pub destination: String,
    #[serde(default)]
    pub days: Vec<ItineraryDay>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItinerariesResponse {
    pub itineraries: Vec<ItineraryDraft>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

// =============================================================================
// Handler functions
// =============================================================================

/// POST /chat - process one chat turn.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let conversation_id = request
        .conversation_id
        .unwrap_or_else(|| DEFAULT_CONVERSATION.to_string());

    let outcome = state
        .orchestrator
        .process_turn(&conversation_id, &request.message)
        .await?;

    Ok(Json(ChatResponse {
        conversation_id,
        outcome,
    }))
}

/// GET /messages - the append-only message log for a conversation.
pub async fn messages(
    State(state): State<AppState>,
    Query(params): Query<ConversationParams>,
) -> Result<Json<MessagesResponse>, ApiError> {
    let conversation_id = params
        .conversation_id
        .unwrap_or_else(|| DEFAULT_CONVERSATION.to_string());
    let messages = state.store.messages(&conversation_id)?;
    Ok(Json(MessagesResponse { messages }))
}

/// POST /history/clear - drop the working window only.
///
/// The append-only log is intentionally untouched; success reports
/// whether a window existed.
pub async fn clear_history(
    State(state): State<AppState>,
    Json(request): Json<ClearHistoryRequest>,
) -> Result<Json<ClearHistoryResponse>, ApiError> {
    let conversation_id = request
        .conversation_id
        .unwrap_or_else(|| DEFAULT_CONVERSATION.to_string());
    let success = state.orchestrator.clear_history(&conversation_id)?;
    Ok(Json(ClearHistoryResponse { success }))
}

/// POST /itineraries - save an itinerary draft.
pub async fn save_itinerary(
    State(state): State<AppState>,
    Json(request): Json<SaveItineraryRequest>,
) -> Result<Json<ItineraryDraft>, ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".to_string()));
    }
    if request.destination.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "destination must not be empty".to_string(),
        ));
    }

    let draft = ItineraryDraft {
        id: Uuid::new_v4(),
        title: request.title,
        destination: request.destination,
        days: request.days,
    };
    state.store.save_itinerary(draft.clone())?;
    Ok(Json(draft))
}

/// GET /itineraries - all saved itineraries.
pub async fn list_itineraries(
    State(state): State<AppState>,
) -> Result<Json<ItinerariesResponse>, ApiError> {
    let itineraries = state.store.itineraries()?;
    Ok(Json(ItinerariesResponse { itineraries }))
}

/// GET /session - the current travel session for a conversation.
pub async fn session(
    State(state): State<AppState>,
    Query(params): Query<ConversationParams>,
) -> Result<Json<TravelSession>, ApiError> {
    let conversation_id = params
        .conversation_id
        .unwrap_or_else(|| DEFAULT_CONVERSATION.to_string());
    let session = state.store.session(&conversation_id)?;
    Ok(Json(session))
}

/// GET /health - service liveness and uptime.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
