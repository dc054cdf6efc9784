//! Store for members and teams.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use teambrain_models::{Member, MemberId, Role, Team, TeamId};

use crate::atomic::{atomic_write_json, read_json_dir, read_json_optional, record_path};
use crate::error::{PersistenceError, Result};

/// Manages persistence of members and teams.
///
/// ```text
/// base_path/
/// ├── members/
/// │   └── member-abc123.json
/// └── teams/
///     └── team-def456.json
/// ```
pub struct TeamStore {
    base_path: PathBuf,
    /// Serializes read-modify-write updates to member and team records.
    write_lock: Mutex<()>,
}

impl TeamStore {
    /// Creates a new TeamStore rooted at `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the base directory.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn members_dir(&self) -> PathBuf {
        self.base_path.join("members")
    }

    fn teams_dir(&self) -> PathBuf {
        self.base_path.join("teams")
    }

    fn member_path(&self, id: &MemberId) -> Result<PathBuf> {
        record_path(&self.members_dir(), id.as_str())
    }

    fn team_path(&self, id: &TeamId) -> Result<PathBuf> {
        record_path(&self.teams_dir(), id.as_str())
    }

    // Members

    /// Registers a member with a fresh id and API key.
    pub fn create_member(&self, name: &str, email: &str) -> Result<Member> {
        let member = Member::new(name, email);
        self.save_member(&member)?;
        info!(member_id = %member.id, name = %member.name, "Created member");
        Ok(member)
    }

    /// Saves a member record, replacing any previous version.
    pub fn save_member(&self, member: &Member) -> Result<()> {
        atomic_write_json(&self.member_path(&member.id)?, member)
    }

    /// Loads a member by id.
    pub fn load_member(&self, id: &MemberId) -> Result<Member> {
        self.load_member_optional(id)?
            .ok_or_else(|| PersistenceError::not_found("member", id))
    }

    /// Loads a member by id, returning `None` if absent.
    pub fn load_member_optional(&self, id: &MemberId) -> Result<Option<Member>> {
        read_json_optional(&self.member_path(id)?)
    }

    /// Loads every member.
    pub fn list_members(&self) -> Result<Vec<Member>> {
        read_json_dir(&self.members_dir())
    }

    /// Finds the member owning an API key.
    pub fn find_member_by_api_key(&self, api_key: &str) -> Result<Option<Member>> {
        if api_key.is_empty() {
            return Ok(None);
        }
        Ok(self
            .list_members()?
            .into_iter()
            .find(|m| m.api_key == api_key))
    }

    /// Links or unlinks a member's messaging assistant.
    pub fn set_relay_key(&self, id: &MemberId, relay_key: Option<String>) -> Result<Member> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut member = self.load_member(id)?;
        member.relay_key = relay_key.filter(|k| !k.trim().is_empty());
        self.save_member(&member)?;
        debug!(member_id = %id, linked = member.has_relay(), "Updated relay key");
        Ok(member)
    }

    // Teams

    /// Creates a team; the creator joins as admin.
    pub fn create_team(&self, name: &str, created_by: &MemberId) -> Result<Team> {
        self.load_member(created_by)?;

        let team = Team::new(name, created_by.clone());
        self.save_team(&team)?;
        info!(team_id = %team.id, name = %team.name, created_by = %created_by, "Created team");
        Ok(team)
    }

    /// Saves a team record, replacing any previous version.
    pub fn save_team(&self, team: &Team) -> Result<()> {
        atomic_write_json(&self.team_path(&team.id)?, team)
    }

    /// Loads a team by id.
    pub fn load_team(&self, id: &TeamId) -> Result<Team> {
        self.load_team_optional(id)?
            .ok_or_else(|| PersistenceError::not_found("team", id))
    }

    /// Loads a team by id, returning `None` if absent.
    pub fn load_team_optional(&self, id: &TeamId) -> Result<Option<Team>> {
        read_json_optional(&self.team_path(id)?)
    }

    /// Loads every team.
    pub fn list_teams(&self) -> Result<Vec<Team>> {
        read_json_dir(&self.teams_dir())
    }

    /// Finds a team by invite code, ignoring case and surrounding whitespace.
    pub fn find_team_by_invite_code(&self, code: &str) -> Result<Option<Team>> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }
        Ok(self
            .list_teams()?
            .into_iter()
            .find(|t| t.invite_code.eq_ignore_ascii_case(code)))
    }

    /// Adds a member to the team with the given invite code.
    ///
    /// Joining a team twice leaves it unchanged.
    ///
    /// # Errors
    /// Returns [`PersistenceError::NotFound`] for an unknown code or member.
    pub fn join_team(&self, invite_code: &str, member_id: &MemberId) -> Result<Team> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        self.load_member(member_id)?;
        let mut team = self
            .find_team_by_invite_code(invite_code)?
            .ok_or_else(|| PersistenceError::not_found("invite code", invite_code.trim()))?;

        if team.add_member(member_id.clone(), Role::Member) {
            self.save_team(&team)?;
            info!(team_id = %team.id, member_id = %member_id, "Member joined team");
        } else {
            debug!(team_id = %team.id, member_id = %member_id, "Member already in team");
        }
        Ok(team)
    }

    /// Member ids of a team, in join order.
    pub fn team_members(&self, team_id: &TeamId) -> Result<Vec<MemberId>> {
        Ok(self.load_team(team_id)?.member_ids())
    }

    /// Teams a member belongs to.
    pub fn member_teams(&self, member_id: &MemberId) -> Result<Vec<Team>> {
        let mut teams: Vec<Team> = self
            .list_teams()?
            .into_iter()
            .filter(|t| t.has_member(member_id))
            .collect();
        teams.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(teams)
    }
}
