//! Store for busy times reported by members.

use std::path::PathBuf;

use chrono::Utc;
use tracing::debug;

use teambrain_models::{CachedAvailability, DateRange, MemberId, TimeInterval};

use crate::atomic::{atomic_write_json, read_json_dir, read_json_optional, record_path, safe_segment};
use crate::error::Result;

/// Manages cached availability reports.
///
/// One file per member and date range; a new report for the same range
/// replaces the old one.
///
/// ```text
/// base_path/
/// └── availability/
///     └── member-abc123/
///         └── 2026-03-02_2026-03-06.json
/// ```
pub struct AvailabilityStore {
    base_path: PathBuf,
}

impl AvailabilityStore {
    /// Creates a new AvailabilityStore rooted at `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn member_dir(&self, member_id: &MemberId) -> Result<PathBuf> {
        Ok(self
            .base_path
            .join("availability")
            .join(safe_segment(member_id.as_str())?))
    }

    fn entry_path(&self, member_id: &MemberId, range: &DateRange) -> Result<PathBuf> {
        record_path(&self.member_dir(member_id)?, &range.key())
    }

    /// Stores a report, replacing any earlier one for the same member and
    /// range.
    pub fn store(&self, entry: &CachedAvailability) -> Result<()> {
        let path = self.entry_path(&entry.member_id, &entry.date_range)?;
        atomic_write_json(&path, entry)?;
        debug!(
            member_id = %entry.member_id,
            range = %entry.date_range.key(),
            busy = entry.busy.len(),
            "Stored availability"
        );
        Ok(())
    }

    /// Stores busy intervals reported now.
    pub fn store_busy(
        &self,
        member_id: &MemberId,
        date_range: DateRange,
        busy: Vec<TimeInterval>,
    ) -> Result<CachedAvailability> {
        let entry = CachedAvailability {
            member_id: member_id.clone(),
            date_range,
            busy,
            synced_at: Utc::now(),
        };
        self.store(&entry)?;
        Ok(entry)
    }

    /// Loads the report for exactly this member and range.
    pub fn load(
        &self,
        member_id: &MemberId,
        date_range: &DateRange,
    ) -> Result<Option<CachedAvailability>> {
        read_json_optional(&self.entry_path(member_id, date_range)?)
    }

    /// Loads every report a member has made.
    pub fn list_for_member(&self, member_id: &MemberId) -> Result<Vec<CachedAvailability>> {
        let mut entries: Vec<CachedAvailability> = read_json_dir(&self.member_dir(member_id)?)?;
        entries.sort_by_key(|e| e.date_range.start_date);
        Ok(entries)
    }
}
