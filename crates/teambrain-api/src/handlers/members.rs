//! Member registration, profile and team membership handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::auth::AuthContext;
use crate::error::{ApiError, Result};
use crate::handlers::teams::member_team;
use crate::state::AppState;
use crate::types::{
    CreateTeamRequest, JoinTeamRequest, MembersResponse, ProfileResponse, RegisterMemberRequest,
    RegisteredMember, RelayKeyRequest, TeamMember, TeamSummary,
};

fn required(value: &str, field: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        Err(ApiError::BadRequest(format!("{} is required", field)))
    } else {
        Ok(value.to_string())
    }
}

/// POST /api/users - Register a member. The response carries the only copy
/// of their API key.
pub async fn register_member(
    State(state): State<AppState>,
    Json(req): Json<RegisterMemberRequest>,
) -> Result<(StatusCode, Json<RegisteredMember>)> {
    let name = required(&req.name, "name")?;
    let member = state.teams.create_member(&name, req.email.trim())?;
    info!(member_id = %member.id, "Member registered");
    Ok((StatusCode::CREATED, Json(member.into())))
}

/// GET /api/me - The caller and their teams.
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<ProfileResponse>> {
    let teams = state.teams.member_teams(&auth.member.id)?;
    Ok(Json(ProfileResponse::new(&auth.member, &teams)))
}

/// PUT /api/me/relay-key - Link or unlink the caller's messaging assistant.
pub async fn set_relay_key(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<RelayKeyRequest>,
) -> Result<Json<ProfileResponse>> {
    let key = req
        .relay_key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let member = state.teams.set_relay_key(&auth.member.id, key)?;
    let teams = state.teams.member_teams(&member.id)?;
    Ok(Json(ProfileResponse::new(&member, &teams)))
}

/// POST /api/teams - Create a team with the caller as admin.
pub async fn create_team(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamSummary>)> {
    let name = required(&req.name, "name")?;
    let team = state.teams.create_team(&name, &auth.member.id)?;
    Ok((StatusCode::CREATED, Json(TeamSummary::from(&team))))
}

/// POST /api/join - Join a team by invite code.
pub async fn join_team(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<JoinTeamRequest>,
) -> Result<Json<TeamSummary>> {
    let code = required(&req.invite_code, "invite_code")?;
    let team = state.teams.join_team(&code, &auth.member.id)?;
    Ok(Json(TeamSummary::from(&team)))
}

/// GET /api/teams/:team_id/members - Who is on the team and who can sync.
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(team_id): Path<String>,
) -> Result<Json<MembersResponse>> {
    let team = member_team(&state, &auth, &team_id)?;

    let mut members = Vec::with_capacity(team.members.len());
    for membership in &team.members {
        if let Some(member) = state.teams.load_member_optional(&membership.member_id)? {
            members.push(TeamMember {
                member_id: member.id.clone(),
                has_relay: member.has_relay(),
                name: member.name,
                role: membership.role,
                joined_at: membership.joined_at,
            });
        }
    }
    Ok(Json(MembersResponse { members }))
}
