//! Messaging relay client.
//!
//! Each member can link a messaging assistant by registering its relay key.
//! Messages posted to the relay webhook reach that assistant as if the
//! member had written them, which is how calendar syncs and bookings are
//! delegated to the member's own calendar integration.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use teambrain_models::{DateRange, MemberId};
use teambrain_persistence::TeamStore;

use crate::error::{RelayError, Result};
use crate::traits::{BookingEvent, BookingSink};

/// Environment variable overriding the relay webhook URL.
pub const RELAY_URL_ENV: &str = "TEAMBRAIN_RELAY_URL";

/// Default relay webhook.
pub const DEFAULT_RELAY_URL: &str = "https://poke.com/api/v1/inbound-sms/webhook";

/// Request timeout for relay calls.
const RELAY_TIMEOUT: Duration = Duration::from_secs(15);

/// Name the assistant knows this integration by.
const INTEGRATION_NAME: &str = "Team Brain";

/// Delivers a message to a member's assistant.
#[async_trait]
pub trait Relay: Send + Sync {
    async fn send(&self, relay_key: &str, message: &str) -> Result<()>;
}

#[derive(Serialize)]
struct RelayMessage<'a> {
    message: &'a str,
}

/// HTTP relay client.
#[derive(Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    url: Url,
}

impl RelayClient {
    /// Creates a client posting to `url`.
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| RelayError::Configuration(format!("invalid relay URL {}: {}", url, e)))?;
        let client = reqwest::Client::builder()
            .timeout(RELAY_TIMEOUT)
            .build()
            .map_err(|e| RelayError::Configuration(e.to_string()))?;
        Ok(Self { client, url })
    }

    /// Creates a client from `TEAMBRAIN_RELAY_URL`, falling back to the
    /// default webhook.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var(RELAY_URL_ENV).unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string());
        Self::new(&url)
    }

    /// Webhook this client posts to.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Relay for RelayClient {
    async fn send(&self, relay_key: &str, message: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url.clone())
            .header("Authorization", format!("Bearer {}", relay_key))
            .json(&RelayMessage { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(RelayError::Http(format!("relay returned {}: {}", status, text)));
        }
        debug!(%status, "Relay message delivered");
        Ok(())
    }
}

/// Message asking an assistant to report busy times with a sync token.
pub fn sync_request_message(token: &str, date_range: &DateRange) -> String {
    let (start, end) = (date_range.start_date, date_range.end_date);
    format!(
        "Check my calendar from {start} to {end} and use the \"{INTEGRATION_NAME}\" \
         integration's sync_my_calendar tool with sync_token={token}, start_date={start}, \
         end_date={end} to share my busy times with the team."
    )
}

/// Message asking an assistant to put a meeting on the calendar.
pub fn booking_message(event: &BookingEvent) -> String {
    format!(
        "Schedule a meeting called '{}' starting at {} for {} minutes. \
         This was booked by {} for the team.",
        event.title,
        event.start.to_rfc3339(),
        event.duration_minutes(),
        event.booked_by
    )
}

/// Books meetings by relaying a message to each member's assistant.
pub struct RelayBookingSink {
    teams: Arc<TeamStore>,
    relay: Arc<dyn Relay>,
}

impl RelayBookingSink {
    pub fn new(teams: Arc<TeamStore>, relay: Arc<dyn Relay>) -> Self {
        Self { teams, relay }
    }
}

#[async_trait]
impl BookingSink for RelayBookingSink {
    async fn create_event(&self, member_id: &MemberId, event: &BookingEvent) -> Result<()> {
        let member = self.teams.load_member(member_id)?;
        let Some(relay_key) = member.relay_key.as_deref().filter(|k| !k.is_empty()) else {
            return Err(RelayError::MissingRelayKey(member_id.clone()));
        };

        self.relay
            .send(relay_key, &booking_message(event))
            .await
            .inspect_err(|e| warn!(member_id = %member_id, error = %e, "Booking relay failed"))
    }
}
