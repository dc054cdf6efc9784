//! Team availability and booking handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use teambrain_models::{Team, TeamId};
use teambrain_relay::{BookingReport, BookingRequest, TeamAvailability};

use crate::auth::AuthContext;
use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::types::{BookMeetingRequest, FindAvailabilityRequest};

/// Loads a team the caller belongs to.
pub(crate) fn member_team(state: &AppState, auth: &AuthContext, team_id: &str) -> Result<Team> {
    let team = state
        .teams
        .load_team_optional(&TeamId::from(team_id))?
        .ok_or_else(|| ApiError::NotFound(format!("team not found: {}", team_id)))?;
    auth.require_member(&team)?;
    Ok(team)
}

/// POST /api/teams/:team_id/availability/find - Find common free slots.
pub async fn find_availability(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(team_id): Path<String>,
    Json(req): Json<FindAvailabilityRequest>,
) -> Result<Json<TeamAvailability>> {
    let team = member_team(&state, &auth, &team_id)?;
    info!(team_id = %team.id, requested_by = %auth.member.id, "Finding team availability");

    let result = state
        .scheduler
        .find_availability(&req.into_request(team.id))
        .await?;
    Ok(Json(result))
}

/// POST /api/teams/:team_id/book - Book a meeting for the whole team.
pub async fn book_meeting(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(team_id): Path<String>,
    Json(req): Json<BookMeetingRequest>,
) -> Result<Json<BookingReport>> {
    let team = member_team(&state, &auth, &team_id)?;

    let report = state
        .scheduler
        .book(&BookingRequest {
            team_id: team.id,
            title: req.title,
            start_time: req.start_time,
            duration_minutes: req.duration_minutes,
            booked_by: auth.member.id,
        })
        .await?;
    Ok(Json(report))
}
