//! Team, member and calendar-sync records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::{MemberId, TeamId};
use crate::time::{DateRange, TimeInterval};

/// Prefix for member API keys.
const API_KEY_PREFIX: &str = "tb_";

/// Role of a member within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Created the team.
    Admin,
    /// Joined with an invite code.
    #[default]
    Member,
}

/// A person who can belong to teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier.
    pub id: MemberId,

    /// Display name.
    pub name: String,

    /// Contact email (may be empty).
    #[serde(default)]
    pub email: String,

    /// Key the member uses to authenticate against the API.
    pub api_key: String,

    /// Key for the member's messaging assistant, used to relay calendar
    /// sync and booking requests. `None` means no assistant is linked.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub relay_key: Option<String>,

    /// When the member was registered.
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Creates a member with a fresh id and API key.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            email: email.into(),
            api_key: format!("{}{}", API_KEY_PREFIX, Uuid::new_v4().simple()),
            relay_key: None,
            created_at: Utc::now(),
        }
    }

    /// Returns true if a messaging assistant is linked.
    pub fn has_relay(&self) -> bool {
        self.relay_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// A member's place in a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Member id.
    pub member_id: MemberId,
    /// Role in the team.
    #[serde(default)]
    pub role: Role,
    /// When the member joined.
    pub joined_at: DateTime<Utc>,
}

/// A team of members who schedule together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier.
    pub id: TeamId,

    /// Team name.
    pub name: String,

    /// Eight-character upper-case code used to join.
    pub invite_code: String,

    /// Member who created the team.
    pub created_by: MemberId,

    /// When the team was created.
    pub created_at: DateTime<Utc>,

    /// Current members, in join order.
    #[serde(default)]
    pub members: Vec<Membership>,
}

impl Team {
    /// Creates a team; the creator joins as admin.
    pub fn new(name: impl Into<String>, created_by: MemberId) -> Self {
        let now = Utc::now();
        let code = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
        Self {
            id: TeamId::new(),
            name: name.into(),
            invite_code: code,
            created_by: created_by.clone(),
            created_at: now,
            members: vec![Membership {
                member_id: created_by,
                role: Role::Admin,
                joined_at: now,
            }],
        }
    }

    /// Returns true if the member belongs to the team.
    pub fn has_member(&self, member_id: &MemberId) -> bool {
        self.members.iter().any(|m| &m.member_id == member_id)
    }

    /// Adds a member. Returns false if already present.
    pub fn add_member(&mut self, member_id: MemberId, role: Role) -> bool {
        if self.has_member(&member_id) {
            return false;
        }
        self.members.push(Membership {
            member_id,
            role,
            joined_at: Utc::now(),
        });
        true
    }

    /// Member ids in join order.
    pub fn member_ids(&self) -> Vec<MemberId> {
        self.members.iter().map(|m| m.member_id.clone()).collect()
    }
}

/// Busy times reported by a member for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedAvailability {
    /// Reporting member.
    pub member_id: MemberId,
    /// Range the report covers.
    pub date_range: DateRange,
    /// Busy intervals.
    pub busy: Vec<TimeInterval>,
    /// When the report was stored.
    pub synced_at: DateTime<Utc>,
}

/// Single-use credential a member's assistant presents when reporting busy
/// times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncToken {
    /// Opaque token value.
    pub token: String,
    /// Member the report is for.
    pub member_id: MemberId,
    /// Team that asked.
    pub team_id: TeamId,
    /// Range being requested.
    pub date_range: DateRange,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
}

impl SyncToken {
    /// Issues a new token.
    pub fn new(member_id: MemberId, team_id: TeamId, date_range: DateRange) -> Self {
        Self {
            token: Uuid::new_v4().simple().to_string(),
            member_id,
            team_id,
            date_range,
            created_at: Utc::now(),
        }
    }
}
