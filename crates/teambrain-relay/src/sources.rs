//! Calendar sources backed by the availability store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use teambrain_models::{DateRange, MemberId, TeamId, TimeInterval};
use teambrain_persistence::{AvailabilityStore, SyncTokenStore, TeamStore};

use crate::error::{RelayError, Result};
use crate::poke::{sync_request_message, Relay};
use crate::traits::CalendarSource;

/// Serves whatever members last reported for the exact date range.
pub struct CachedCalendarSource {
    store: Arc<AvailabilityStore>,
}

impl CachedCalendarSource {
    pub fn new(store: Arc<AvailabilityStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CalendarSource for CachedCalendarSource {
    async fn busy_intervals(
        &self,
        _team_id: &TeamId,
        member_id: &MemberId,
        date_range: &DateRange,
    ) -> Result<Option<Vec<TimeInterval>>> {
        Ok(self.store.load(member_id, date_range)?.map(|entry| entry.busy))
    }
}

/// Interval schedule for polling the availability store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollSchedule {
    pub initial: Duration,
    pub factor: f64,
    pub max_interval: Duration,
    /// Give up once this much time has passed since the request was sent.
    pub budget: Duration,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            initial: Duration::from_secs(2),
            factor: 1.3,
            max_interval: Duration::from_secs(5),
            budget: Duration::from_secs(40),
        }
    }
}

impl PollSchedule {
    fn next(&self, current: Duration) -> Duration {
        current.mul_f64(self.factor).min(self.max_interval)
    }
}

/// Asks each member's messaging assistant for fresh busy times.
///
/// The assistant receives a one-time sync token and reports back through the
/// sync endpoint, which lands in the availability store. This source polls
/// the store until a report newer than the request appears.
pub struct RelayCalendarSource {
    teams: Arc<TeamStore>,
    availability: Arc<AvailabilityStore>,
    tokens: Arc<SyncTokenStore>,
    relay: Arc<dyn Relay>,
    schedule: PollSchedule,
}

impl RelayCalendarSource {
    pub fn new(
        teams: Arc<TeamStore>,
        availability: Arc<AvailabilityStore>,
        tokens: Arc<SyncTokenStore>,
        relay: Arc<dyn Relay>,
    ) -> Self {
        Self {
            teams,
            availability,
            tokens,
            relay,
            schedule: PollSchedule::default(),
        }
    }

    pub fn with_schedule(mut self, schedule: PollSchedule) -> Self {
        self.schedule = schedule;
        self
    }
}

#[async_trait]
impl CalendarSource for RelayCalendarSource {
    async fn busy_intervals(
        &self,
        team_id: &TeamId,
        member_id: &MemberId,
        date_range: &DateRange,
    ) -> Result<Option<Vec<TimeInterval>>> {
        let member = self.teams.load_member(member_id)?;
        let Some(relay_key) = member.relay_key.as_deref().filter(|k| !k.is_empty()) else {
            debug!(member_id = %member_id, "No relay key, skipping");
            return Ok(None);
        };

        let asked_at = Utc::now();
        let token = self.tokens.issue(member_id, team_id, *date_range)?;
        self.relay
            .send(relay_key, &sync_request_message(&token.token, date_range))
            .await?;
        info!(member_id = %member_id, range = %date_range.key(), "Requested calendar sync");

        let started = Instant::now();
        let mut interval = self.schedule.initial;
        loop {
            sleep(interval).await;

            if let Some(entry) = self.availability.load(member_id, date_range)? {
                if entry.synced_at >= asked_at {
                    return Ok(Some(entry.busy));
                }
            }

            if started.elapsed() >= self.schedule.budget {
                return Err(RelayError::CalendarUnavailable {
                    member_id: member_id.clone(),
                    reason: format!("no report within {:?}", self.schedule.budget),
                });
            }
            interval = self.schedule.next(interval);
        }
    }
}
