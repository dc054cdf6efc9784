//! Core business logic for Team Brain.
//!
//! - [`availability`]: finds meeting slots where a whole team is free
//! - [`format`]: renders slots as locale-stable display strings
//! - [`config`]: locates the state directory and environment files

pub mod availability;
pub mod config;
pub mod error;
pub mod format;

pub use availability::{find_common_slots, validate_request, Availability, MAX_LISTED_SLOTS};
pub use error::{AvailabilityError, Result};
pub use format::{format_interval, format_slot};
