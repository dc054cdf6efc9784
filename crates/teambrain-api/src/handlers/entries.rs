//! Captured entry handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use teambrain_models::{CapturedEntry, Category};

use crate::auth::AuthContext;
use crate::error::{ApiError, Result};
use crate::handlers::assistant::require_assistant;
use crate::state::AppState;
use crate::types::{ClassifyRequest, EntriesQuery, EntriesResponse};

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 500;

/// POST /api/entries - Classify text and save it for the caller.
pub async fn capture_entry(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<ClassifyRequest>,
) -> Result<(StatusCode, Json<CapturedEntry>)> {
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text is empty".to_string()));
    }
    let entry = require_assistant(&state)?.classify(&req.text).await?;
    let captured = state.entries.capture(&auth.member.id, entry)?;
    info!(
        member_id = %auth.member.id,
        entry_id = %captured.id,
        category = %captured.entry.category,
        "Entry captured"
    );
    Ok((StatusCode::CREATED, Json(captured)))
}

/// GET /api/entries - The caller's recent entries.
pub async fn list_entries(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<EntriesQuery>,
) -> Result<Json<EntriesResponse>> {
    let category = query
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let entries = state.entries.recent(&auth.member.id, category, limit)?;
    Ok(Json(EntriesResponse {
        count: entries.len(),
        entries,
    }))
}
