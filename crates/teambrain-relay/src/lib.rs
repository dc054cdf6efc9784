//! Calendar access and scheduling for Team Brain.
//!
//! Members' busy times arrive through a [`CalendarSource`]: either the
//! reports already cached in the availability store, or a live request
//! relayed to each member's messaging assistant. The [`Scheduler`] ties a
//! source, a [`MembershipStore`] and a [`BookingSink`] together:
//!
//! ```text
//! find_availability:  team members -> fetch_team_busy -> find_common_slots
//! book:               team members -> BookingSink::create_event (fan-out)
//! ```
//!
//! Members that cannot be read are treated as free and reported as
//! degraded rather than failing the whole request.

pub mod error;
pub mod fetch;
pub mod poke;
pub mod service;
pub mod sources;
pub mod traits;

pub use error::{RelayError, Result};
pub use fetch::{fetch_team_busy, DegradedMember, FetchPolicy, TeamBusy};
pub use poke::{Relay, RelayBookingSink, RelayClient, DEFAULT_RELAY_URL, RELAY_URL_ENV};
pub use service::{BookingReport, BookingRequest, MemberBookingResult, Scheduler, TeamAvailability};
pub use sources::{CachedCalendarSource, PollSchedule, RelayCalendarSource};
pub use traits::{BookingEvent, BookingSink, CalendarSource, MembershipStore};
