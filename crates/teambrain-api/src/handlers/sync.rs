//! Calendar sync handler.

use axum::{extract::State, Json};
use tracing::{info, warn};

use teambrain_models::{DateRange, TimeInterval};

use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::types::{SyncAvailabilityRequest, SyncResponse};

/// POST /api/availability/sync - Store busy times reported by a member's
/// assistant. The one-time sync token identifies the member.
pub async fn sync_availability(
    State(state): State<AppState>,
    Json(req): Json<SyncAvailabilityRequest>,
) -> Result<Json<SyncResponse>> {
    let busy = req
        .busy_times
        .iter()
        .map(|b| TimeInterval::new(b.start, b.end))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let token = state
        .tokens
        .consume(&req.sync_token)?
        .ok_or_else(|| ApiError::BadRequest("invalid or expired sync token".to_string()))?;

    let reported = DateRange::new(req.start_date, req.end_date);
    if reported != token.date_range {
        warn!(
            member_id = %token.member_id,
            requested = %token.date_range.key(),
            reported = %reported.key(),
            "Report range differs from request, storing under requested range"
        );
    }

    let entry = state
        .availability
        .store_busy(&token.member_id, token.date_range, busy)?;
    info!(
        member_id = %entry.member_id,
        team_id = %token.team_id,
        busy = entry.busy.len(),
        "Availability synced"
    );

    Ok(Json(SyncResponse {
        message: "Availability synced".to_string(),
        member_id: entry.member_id,
        busy_count: entry.busy.len(),
    }))
}
