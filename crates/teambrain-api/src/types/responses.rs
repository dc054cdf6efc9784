//! Response DTOs for the API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use teambrain_models::{CapturedEntry, Member, MemberId, Role, Team, TeamId};

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
    /// Whether classification and chat are available.
    pub assistant: bool,
}

/// Calendar report accepted.
#[derive(Debug, Clone, Serialize)]
pub struct SyncResponse {
    pub message: String,
    pub member_id: MemberId,
    pub busy_count: usize,
}

/// Assistant reply.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Captured entries, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<CapturedEntry>,
    pub count: usize,
}

/// A newly registered member and the key they authenticate with.
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredMember {
    pub member_id: MemberId,
    pub name: String,
    pub api_key: String,
}

impl From<Member> for RegisteredMember {
    fn from(member: Member) -> Self {
        Self {
            member_id: member.id,
            name: member.name,
            api_key: member.api_key,
        }
    }
}

/// A team as its members see it.
#[derive(Debug, Clone, Serialize)]
pub struct TeamSummary {
    pub team_id: TeamId,
    pub name: String,
    pub invite_code: String,
    pub member_count: usize,
}

impl From<&Team> for TeamSummary {
    fn from(team: &Team) -> Self {
        Self {
            team_id: team.id.clone(),
            name: team.name.clone(),
            invite_code: team.invite_code.clone(),
            member_count: team.members.len(),
        }
    }
}

/// The calling member. Keys are never echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub member_id: MemberId,
    pub name: String,
    pub email: String,
    pub has_relay: bool,
    pub teams: Vec<TeamSummary>,
}

impl ProfileResponse {
    pub fn new(member: &Member, teams: &[Team]) -> Self {
        Self {
            member_id: member.id.clone(),
            name: member.name.clone(),
            email: member.email.clone(),
            has_relay: member.has_relay(),
            teams: teams.iter().map(TeamSummary::from).collect(),
        }
    }
}

/// One team member, without credentials.
#[derive(Debug, Clone, Serialize)]
pub struct TeamMember {
    pub member_id: MemberId,
    pub name: String,
    pub role: Role,
    pub has_relay: bool,
    pub joined_at: DateTime<Utc>,
}

/// Members of a team, in join order.
#[derive(Debug, Clone, Serialize)]
pub struct MembersResponse {
    pub members: Vec<TeamMember>,
}
