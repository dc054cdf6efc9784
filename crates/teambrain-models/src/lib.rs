//! Core data models for Team Brain.
//!
//! This crate provides the value types shared by every Team Brain crate:
//! identifiers, time intervals, availability requests and results, and the
//! team/member records kept by the stores.

pub mod availability;
pub mod entry;
pub mod error;
pub mod ids;
pub mod team;
pub mod time;

// Re-export main types
pub use availability::{AvailabilityRequest, MemberBusySet, Slot, DEFAULT_DAYS, MAX_MEETING_MINUTES};
pub use entry::{CapturedEntry, Category, Entry};
pub use error::{ModelError, Result};
pub use ids::{EntryId, MemberId, TeamId};
pub use team::{CachedAvailability, Member, Membership, Role, SyncToken, Team};
pub use time::{DateRange, TimeInterval, WorkingHours};
