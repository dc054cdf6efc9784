//! Concurrent, bounded fetch of a team's busy times.

use std::collections::HashSet;
use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::time::{sleep, timeout_at, Instant};
use tracing::{debug, warn};

use teambrain_models::{DateRange, MemberBusySet, MemberId, TeamId, TimeInterval};

use crate::traits::CalendarSource;

/// Retry and deadline settings for [`fetch_team_busy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Reads per member before giving up (at least one).
    pub max_attempts: u32,
    /// Pause between attempts.
    pub backoff: Duration,
    /// Deadline for the whole fetch.
    pub timeout: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(500),
            timeout: Duration::from_secs(45),
        }
    }
}

impl FetchPolicy {
    /// Sets the aggregate timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the attempt count and backoff.
    pub fn with_retries(mut self, max_attempts: u32, backoff: Duration) -> Self {
        self.max_attempts = max_attempts;
        self.backoff = backoff;
        self
    }
}

/// A member whose calendar could not be read and who was treated as free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegradedMember {
    pub member_id: MemberId,
    pub reason: String,
}

/// Outcome of fetching a team's calendars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamBusy {
    /// Busy intervals of every member that was read.
    pub busy: MemberBusySet,
    /// Members that failed or timed out.
    pub degraded: Vec<DegradedMember>,
    /// Members without a linked calendar.
    pub unlinked: Vec<MemberId>,
}

enum Outcome {
    Busy(Vec<TimeInterval>),
    Unlinked,
    Failed(String),
}

/// Reads every member's busy intervals concurrently.
///
/// Failed reads are retried per `policy`. Members still failing, or not
/// finished when `policy.timeout` elapses, end up in
/// [`TeamBusy::degraded`]; reads that completed in time are kept.
/// Duplicate ids are read once.
pub async fn fetch_team_busy<S>(
    source: &S,
    team_id: &TeamId,
    members: &[MemberId],
    date_range: &DateRange,
    policy: &FetchPolicy,
) -> TeamBusy
where
    S: CalendarSource + ?Sized,
{
    let mut seen = HashSet::new();
    let unique: Vec<&MemberId> = members.iter().filter(|m| seen.insert(*m)).collect();

    let deadline = Instant::now() + policy.timeout;
    let reads = unique.iter().map(|member_id| async move {
        let outcome = timeout_at(
            deadline,
            read_with_retries(source, team_id, member_id, date_range, policy),
        )
        .await
        .unwrap_or_else(|_| Outcome::Failed(format!("no response within {:?}", policy.timeout)));
        (*member_id, outcome)
    });

    let mut result = TeamBusy::default();
    for (member_id, outcome) in join_all(reads).await {
        match outcome {
            Outcome::Busy(intervals) => result.busy.insert(member_id.clone(), intervals),
            Outcome::Unlinked => result.unlinked.push(member_id.clone()),
            Outcome::Failed(reason) => {
                warn!(member_id = %member_id, reason = %reason, "Treating member as free");
                result.degraded.push(DegradedMember {
                    member_id: member_id.clone(),
                    reason,
                });
            }
        }
    }

    debug!(
        team_id = %team_id,
        read = result.busy.len(),
        unlinked = result.unlinked.len(),
        degraded = result.degraded.len(),
        "Fetched team busy times"
    );
    result
}

async fn read_with_retries<S>(
    source: &S,
    team_id: &TeamId,
    member_id: &MemberId,
    date_range: &DateRange,
    policy: &FetchPolicy,
) -> Outcome
where
    S: CalendarSource + ?Sized,
{
    let attempts = policy.max_attempts.max(1);
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        match source.busy_intervals(team_id, member_id, date_range).await {
            Ok(Some(intervals)) => return Outcome::Busy(intervals),
            Ok(None) => return Outcome::Unlinked,
            Err(e) => {
                debug!(member_id = %member_id, attempt, error = %e, "Calendar read failed");
                last_error = e.to_string();
                if attempt < attempts {
                    sleep(policy.backoff).await;
                }
            }
        }
    }
    Outcome::Failed(last_error)
}
