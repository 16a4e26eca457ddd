//! Route handler functions for all API endpoints.
//!
//! Handlers are thin: they validate the request shape, delegate to the
//! [`ChatService`](beacon_chat::ChatService), and return JSON.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use beacon_chat::{respond, ChatError, Reply, SessionSnapshot};
use beacon_core::KnowledgeBase;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

/// Body for endpoints that take visitor text.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub open_sessions: usize,
}

/// Outcome of `POST /chat/sessions/{id}/messages`.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    /// False when the submission was silently ignored.
    pub accepted: bool,
    /// Why the submission was ignored ("empty_input" or "reply_pending").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub session: SessionSnapshot,
}

// =============================================================================
// Handler functions
// =============================================================================

/// GET /health - health check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        open_sessions: state.chat.session_count(),
    })
}

/// GET /knowledge - the full knowledge base, for page rendering.
pub async fn knowledge(State(state): State<AppState>) -> Json<KnowledgeBase> {
    Json(state.chat.knowledge().clone())
}

/// POST /chat/respond - classify and compose without a session.
pub async fn respond_once(
    State(state): State<AppState>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<Reply>, ApiError> {
    check_length(&state, &req.text)?;
    Ok(Json(respond(&req.text, state.chat.knowledge())))
}

/// POST /chat/sessions - open a session seeded with the greeting.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionSnapshot>), ApiError> {
    let snapshot = state.chat.create_session()?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /chat/sessions/{id} - current transcript and composing flag.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    Ok(Json(state.chat.snapshot(id)?))
}

/// POST /chat/sessions/{id}/messages - submit visitor text.
///
/// Returns 202 once the user turn is appended and the reply scheduled.
/// Blank text or a submission during a pending reply is ignored and
/// reported with 200 and `accepted: false`.
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MessageRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let (status, accepted, reason) = match state.chat.submit(id, &req.text) {
        // The reply lands on its own; clients poll the session.
        Ok(_handle) => (StatusCode::ACCEPTED, true, None),
        Err(e) if e.is_ignorable() => (StatusCode::OK, false, Some(e.code().to_string())),
        Err(e) => return Err(e.into()),
    };

    let session = state.chat.snapshot(id)?;
    Ok((
        status,
        Json(SubmitResponse {
            accepted,
            reason,
            session,
        }),
    ))
}

/// DELETE /chat/sessions/{id} - tear the session down.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.chat.close(id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn check_length(state: &AppState, text: &str) -> Result<(), ApiError> {
    let limit = state.config.chat.max_message_length;
    if text.trim().chars().count() > limit {
        return Err(ChatError::MessageTooLong(limit).into());
    }
    Ok(())
}
