//! Request DTOs for the API.

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::Deserialize;

use teambrain_agent::ChatMessage;
use teambrain_models::{AvailabilityRequest, DateRange, TeamId, WorkingHours};

fn default_duration() -> i64 {
    30
}

/// Find availability request.
#[derive(Debug, Clone, Deserialize)]
pub struct FindAvailabilityRequest {
    /// First day to search (inclusive).
    pub start_date: NaiveDate,
    /// Last day to search (inclusive).
    pub end_date: NaiveDate,
    /// Meeting length in minutes.
    #[serde(default = "default_duration")]
    pub duration_minutes: i64,
    /// Start of the working day, hour 0-23.
    pub start_hour: Option<u32>,
    /// End of the working day, hour 1-24.
    pub end_hour: Option<u32>,
    /// Weekdays to consider; Monday to Friday when omitted.
    pub days: Option<Vec<Weekday>>,
    /// IANA zone the working hours are in; UTC when omitted.
    pub timezone: Option<Tz>,
}

impl FindAvailabilityRequest {
    /// Builds the resolver request for a team.
    pub fn into_request(self, team_id: TeamId) -> AvailabilityRequest {
        let defaults = WorkingHours::default();
        let hours = WorkingHours::new(
            self.start_hour.unwrap_or(defaults.start_hour),
            self.end_hour.unwrap_or(defaults.end_hour),
        );
        let mut request = AvailabilityRequest::new(
            team_id,
            DateRange::new(self.start_date, self.end_date),
            self.duration_minutes,
        )
        .with_working_hours(hours);
        if let Some(days) = self.days {
            request = request.with_days(days);
        }
        if let Some(tz) = self.timezone {
            request = request.with_timezone(tz);
        }
        request
    }
}

/// Book meeting request.
#[derive(Debug, Clone, Deserialize)]
pub struct BookMeetingRequest {
    /// Meeting title.
    pub title: String,
    /// Meeting start.
    pub start_time: DateTime<Utc>,
    /// Meeting length in minutes.
    #[serde(default = "default_duration")]
    pub duration_minutes: i64,
}

/// One reported busy block.
#[derive(Debug, Clone, Deserialize)]
pub struct BusyTime {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Calendar report from a member's assistant.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncAvailabilityRequest {
    /// One-time token from the sync request message.
    pub sync_token: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub busy_times: Vec<BusyTime>,
}

/// Classify text request.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

/// Chat request.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// Query for listing captured entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntriesQuery {
    /// Only entries of this category.
    pub category: Option<String>,
    /// Maximum number of entries; 50 when omitted.
    pub limit: Option<usize>,
}

/// Register member request.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterMemberRequest {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Create team request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
}

/// Join team request.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinTeamRequest {
    pub invite_code: String,
}

/// Link or unlink the caller's messaging assistant.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayKeyRequest {
    /// `null` or omitted unlinks.
    #[serde(default)]
    pub relay_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_request_defaults() {
        let req: FindAvailabilityRequest =
            serde_json::from_str(r#"{"start_date": "2026-03-02", "end_date": "2026-03-06"}"#)
                .unwrap();
        let request = req.into_request(TeamId::from("team-1"));

        assert_eq!(request.duration_minutes, 30);
        assert_eq!(request.working_hours, WorkingHours::new(9, 17));
        assert_eq!(request.timezone, Tz::UTC);
        assert_eq!(request.days_included.len(), 5);
    }

    #[test]
    fn test_find_request_overrides() {
        let req: FindAvailabilityRequest = serde_json::from_str(
            r#"{"start_date": "2026-03-02", "end_date": "2026-03-02",
                "duration_minutes": 45, "start_hour": 8, "end_hour": 12,
                "days": ["Mon"], "timezone": "America/New_York"}"#,
        )
        .unwrap();
        let request = req.into_request(TeamId::from("team-1"));

        assert_eq!(request.duration_minutes, 45);
        assert_eq!(request.working_hours, WorkingHours::new(8, 12));
        assert_eq!(request.timezone, chrono_tz::America::New_York);
        assert_eq!(request.days_included, vec![Weekday::Mon]);
    }

    #[test]
    fn test_book_request_default_duration() {
        let req: BookMeetingRequest = serde_json::from_str(
            r#"{"title": "Planning", "start_time": "2026-03-02T14:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(req.duration_minutes, 30);
    }

    #[test]
    fn test_relay_key_request_defaults_to_unlink() {
        let req: RelayKeyRequest = serde_json::from_str("{}").unwrap();
        assert!(req.relay_key.is_none());

        let req: RegisterMemberRequest = serde_json::from_str(r#"{"name": "Alice"}"#).unwrap();
        assert!(req.email.is_empty());
    }
}
