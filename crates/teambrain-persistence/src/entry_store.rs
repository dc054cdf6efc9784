//! Store for members' captured entries.

use std::path::PathBuf;

use tracing::debug;

use teambrain_models::{CapturedEntry, Category, Entry, EntryId, MemberId};

use crate::atomic::{atomic_write_json, read_json_dir, read_json_optional, record_path, safe_segment};
use crate::error::Result;

/// Manages entries captured from members' free-form text.
///
/// Entries are private to the member who captured them.
///
/// ```text
/// base_path/
/// └── entries/
///     └── member-abc123/
///         └── entry-def456.json
/// ```
pub struct EntryStore {
    base_path: PathBuf,
}

impl EntryStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn member_dir(&self, member_id: &MemberId) -> Result<PathBuf> {
        Ok(self
            .base_path
            .join("entries")
            .join(safe_segment(member_id.as_str())?))
    }

    /// Saves a classified entry for `member_id`.
    pub fn capture(&self, member_id: &MemberId, entry: Entry) -> Result<CapturedEntry> {
        let captured = CapturedEntry::new(member_id.clone(), entry);
        let path = record_path(&self.member_dir(member_id)?, captured.id.as_str())?;
        atomic_write_json(&path, &captured)?;
        debug!(
            member_id = %member_id,
            entry_id = %captured.id,
            category = %captured.entry.category,
            "Captured entry"
        );
        Ok(captured)
    }

    /// Loads one of a member's entries.
    pub fn load(&self, member_id: &MemberId, id: &EntryId) -> Result<Option<CapturedEntry>> {
        read_json_optional(&record_path(&self.member_dir(member_id)?, id.as_str())?)
    }

    /// A member's most recent entries, newest first, optionally limited to
    /// one category.
    pub fn recent(
        &self,
        member_id: &MemberId,
        category: Option<Category>,
        limit: usize,
    ) -> Result<Vec<CapturedEntry>> {
        let mut entries: Vec<CapturedEntry> = read_json_dir(&self.member_dir(member_id)?)?;
        entries.retain(|e| category.map_or(true, |c| e.entry.category == c));
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        entries.truncate(limit);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use tempfile::tempdir;

    fn entry(category: Category, title: &str) -> Entry {
        Entry {
            category,
            title: title.to_string(),
            summary: String::new(),
            fields: Map::new(),
            raw_input: title.to_lowercase(),
        }
    }

    #[test]
    fn test_capture_and_load() {
        let dir = tempdir().unwrap();
        let store = EntryStore::new(dir.path());
        let alice = MemberId::from("member-alice");

        let captured = store.capture(&alice, entry(Category::Task, "Call dentist")).unwrap();
        let loaded = store.load(&alice, &captured.id).unwrap().unwrap();
        assert_eq!(loaded, captured);

        let bob = MemberId::from("member-bob");
        assert!(store.load(&bob, &captured.id).unwrap().is_none());
    }

    #[test]
    fn test_recent_filters_and_orders() {
        let dir = tempdir().unwrap();
        let store = EntryStore::new(dir.path());
        let alice = MemberId::from("member-alice");

        let first = store.capture(&alice, entry(Category::Task, "First")).unwrap();
        store.capture(&alice, entry(Category::Idea, "Second")).unwrap();
        let third = store.capture(&alice, entry(Category::Task, "Third")).unwrap();
        store
            .capture(&MemberId::from("member-bob"), entry(Category::Task, "Other"))
            .unwrap();

        let all = store.recent(&alice, None, 50).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let tasks = store.recent(&alice, Some(Category::Task), 50).unwrap();
        let mut ids: Vec<_> = tasks.iter().map(|e| e.id.clone()).collect();
        ids.sort();
        let mut expected = vec![first.id, third.id];
        expected.sort();
        assert_eq!(ids, expected);

        assert_eq!(store.recent(&alice, None, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_recent_empty_for_new_member() {
        let dir = tempdir().unwrap();
        let store = EntryStore::new(dir.path());
        assert!(store
            .recent(&MemberId::from("member-new"), None, 10)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_rejects_unsafe_member_id() {
        let dir = tempdir().unwrap();
        let store = EntryStore::new(dir.path());
        let result = store.capture(&MemberId::from("../escape"), entry(Category::Note, "x"));
        assert!(result.is_err());
    }
}
