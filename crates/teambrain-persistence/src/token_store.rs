//! Store for one-time sync tokens.

use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, warn};

use teambrain_models::{DateRange, MemberId, SyncToken, TeamId};

use crate::atomic::{atomic_write_json, read_json_optional, record_path, remove_if_exists};
use crate::error::{PersistenceError, Result};

/// Manages sync tokens handed to members' assistants.
///
/// ```text
/// base_path/
/// └── sync_tokens/
///     └── {token}.json
/// ```
pub struct SyncTokenStore {
    base_path: PathBuf,
    consume_lock: Mutex<()>,
}

impl SyncTokenStore {
    /// Creates a new SyncTokenStore rooted at `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            consume_lock: Mutex::new(()),
        }
    }

    fn tokens_dir(&self) -> PathBuf {
        self.base_path.join("sync_tokens")
    }

    /// Issues and persists a token for a member's report.
    pub fn issue(
        &self,
        member_id: &MemberId,
        team_id: &TeamId,
        date_range: DateRange,
    ) -> Result<SyncToken> {
        let token = SyncToken::new(member_id.clone(), team_id.clone(), date_range);
        atomic_write_json(&record_path(&self.tokens_dir(), &token.token)?, &token)?;
        debug!(member_id = %member_id, team_id = %team_id, "Issued sync token");
        Ok(token)
    }

    /// Returns and deletes a token. Unknown, malformed or already used
    /// tokens yield `None`.
    pub fn consume(&self, token: &str) -> Result<Option<SyncToken>> {
        let path = match record_path(&self.tokens_dir(), token) {
            Ok(path) => path,
            Err(PersistenceError::InvalidId(_)) => {
                warn!("Rejected malformed sync token");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let _guard = self.consume_lock.lock().unwrap_or_else(|e| e.into_inner());
        let Some(record) = read_json_optional::<SyncToken>(&path)? else {
            return Ok(None);
        };
        remove_if_exists(&path)?;
        debug!(member_id = %record.member_id, "Consumed sync token");
        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn range() -> DateRange {
        DateRange::single(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
    }

    #[test]
    fn test_issue_and_consume_once() {
        let dir = tempdir().unwrap();
        let store = SyncTokenStore::new(dir.path());
        let member = MemberId::from("member-alice");
        let team = TeamId::from("team-core");

        let token = store.issue(&member, &team, range()).unwrap();

        let consumed = store.consume(&token.token).unwrap().unwrap();
        assert_eq!(consumed, token);
        assert!(store.consume(&token.token).unwrap().is_none());
    }

    #[test]
    fn test_consume_unknown_or_malformed() {
        let dir = tempdir().unwrap();
        let store = SyncTokenStore::new(dir.path());

        assert!(store.consume("deadbeef").unwrap().is_none());
        assert!(store.consume("../teams/x").unwrap().is_none());
        assert!(store.consume("").unwrap().is_none());
    }
}
