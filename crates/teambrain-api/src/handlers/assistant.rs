//! Classification and chat handlers.

use std::sync::Arc;

use axum::{extract::State, Json};

use teambrain_agent::{Assistant, Entry};

use crate::auth::AuthContext;
use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::types::{ChatRequest, ChatResponse, ClassifyRequest};

/// The configured assistant, or 503.
pub(crate) fn require_assistant(state: &AppState) -> Result<Arc<dyn Assistant>> {
    state
        .assistant
        .clone()
        .ok_or_else(|| ApiError::ServiceUnavailable("assistant not configured".to_string()))
}

/// POST /api/classify - Classify free-form text.
pub async fn classify(
    State(state): State<AppState>,
    _auth: AuthContext,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<Entry>> {
    let entry = require_assistant(&state)?.classify(&req.text).await?;
    Ok(Json(entry))
}

/// POST /api/chat - Reply within a conversation.
pub async fn chat(
    State(state): State<AppState>,
    _auth: AuthContext,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let reply = require_assistant(&state)?.respond(&req.messages).await?;
    Ok(Json(ChatResponse { reply }))
}
