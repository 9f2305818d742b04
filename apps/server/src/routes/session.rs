//! Quiz session endpoints

use axum::{extract::State, Extension, Json};
use chrono::Utc;
use wordquiz_core::Event;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/modes
pub async fn modes() -> Json<ModesResponse> {
    Json(ModesResponse {
        modes: Mode::ALL
            .iter()
            .map(|mode| ModeOption {
                mode: *mode,
                label: mode.label().to_string(),
            })
            .collect(),
    })
}

/// POST /api/session/mode
/// Starts a fresh session, discarding any previous one
pub async fn select_mode(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<SelectModeRequest>,
) -> Result<Json<MessagesResponse>> {
    let mode = Mode::parse(payload.mode.trim())
        .ok_or_else(|| ApiError::BadRequest(format!("unknown mode: {}", payload.mode)))?;

    let slot = state.sessions.slot(&auth.user_id)?;
    let mut slot = slot.lock().await;

    let replies = state
        .engine
        .handle(&mut slot.session, Event::ModeSelected(mode))
        .await;
    slot.started_at = Some(Utc::now());

    tracing::info!(user_id = %auth.user_id, mode = mode.as_str(), "Session started");

    Ok(Json(MessagesResponse::new(
        replies,
        SessionState::of(slot.session.as_ref()),
    )))
}

/// POST /api/session/answer
pub async fn submit_answer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<Json<MessagesResponse>> {
    let slot = state.sessions.slot(&auth.user_id)?;
    let mut slot = slot.lock().await;

    let replies = state
        .engine
        .handle(&mut slot.session, Event::TextSubmitted(payload.text))
        .await;

    if let Some(session) = slot.session.as_ref() {
        tracing::debug!(
            user_id = %auth.user_id,
            position = session.position(),
            score = session.score(),
            "Answer handled"
        );
    }

    Ok(Json(MessagesResponse::new(
        replies,
        SessionState::of(slot.session.as_ref()),
    )))
}

/// GET /api/session
pub async fn status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<SessionStatusResponse>> {
    let slot = state.sessions.slot(&auth.user_id)?;
    let slot = slot.lock().await;

    let session = slot
        .session
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("No active session".to_string()))?;

    Ok(Json(SessionStatusResponse {
        mode: session.mode(),
        state: session.state(),
        position: session.position(),
        total: session.total(),
        score: session.score(),
        started_at: slot.started_at,
    }))
}
