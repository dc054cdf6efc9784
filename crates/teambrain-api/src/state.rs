//! Application state shared across handlers.

use std::path::Path;
use std::sync::Arc;

use teambrain_agent::Assistant;
use teambrain_persistence::{AvailabilityStore, EntryStore, SyncTokenStore, TeamStore};
use teambrain_relay::{
    CachedCalendarSource, CalendarSource, FetchPolicy, Relay, RelayBookingSink,
    RelayCalendarSource, Scheduler,
};

use crate::config::ApiConfig;

/// Where availability searches get members' busy times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Ask each member's assistant for a fresh report.
    #[default]
    Live,
    /// Use only reports already stored.
    Cached,
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Members and teams.
    pub teams: Arc<TeamStore>,
    /// Reported busy times.
    pub availability: Arc<AvailabilityStore>,
    /// One-time sync tokens.
    pub tokens: Arc<SyncTokenStore>,
    /// Members' captured entries.
    pub entries: Arc<EntryStore>,
    /// Availability search and booking.
    pub scheduler: Scheduler,
    /// Classification and chat (optional - may be None when no model key).
    pub assistant: Option<Arc<dyn Assistant>>,
}

impl AppState {
    /// Opens the stores under `data_dir` and wires the scheduler.
    ///
    /// Bookings always go through `relay`; availability reads use it only in
    /// [`SyncMode::Live`].
    pub fn open(
        config: ApiConfig,
        data_dir: &Path,
        relay: Arc<dyn Relay>,
        mode: SyncMode,
        policy: FetchPolicy,
    ) -> Self {
        let teams = Arc::new(TeamStore::new(data_dir));
        let availability = Arc::new(AvailabilityStore::new(data_dir));
        let tokens = Arc::new(SyncTokenStore::new(data_dir));

        let calendars: Arc<dyn CalendarSource> = match mode {
            SyncMode::Live => Arc::new(RelayCalendarSource::new(
                teams.clone(),
                availability.clone(),
                tokens.clone(),
                relay.clone(),
            )),
            SyncMode::Cached => Arc::new(CachedCalendarSource::new(availability.clone())),
        };
        let bookings = Arc::new(RelayBookingSink::new(teams.clone(), relay));
        let scheduler = Scheduler::new(teams.clone(), calendars, bookings).with_policy(policy);

        Self {
            config: Arc::new(config),
            teams,
            availability,
            tokens,
            entries: Arc::new(EntryStore::new(data_dir)),
            scheduler,
            assistant: None,
        }
    }

    /// Enables the classification and chat endpoints.
    pub fn with_assistant(mut self, assistant: Arc<dyn Assistant>) -> Self {
        self.assistant = Some(assistant);
        self
    }
}
