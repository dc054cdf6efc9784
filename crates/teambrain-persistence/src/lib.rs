//! Persistence layer for Team Brain.
//!
//! Teams, members, reported availability, captured entries and sync tokens
//! are stored as JSON files under a base directory. Every write goes through
//! a temp file and a rename, so a crash never leaves a half-written record.
//!
//! ```text
//! base_path/
//! ├── members/{member_id}.json
//! ├── teams/{team_id}.json
//! ├── availability/{member_id}/{start}_{end}.json
//! ├── entries/{member_id}/{entry_id}.json
//! └── sync_tokens/{token}.json
//! ```
//!
//! # Example
//!
//! ```no_run
//! use teambrain_persistence::TeamStore;
//!
//! let store = TeamStore::new("/home/user/.teambrain/state");
//! let alice = store.create_member("Alice", "alice@example.com").unwrap();
//! let team = store.create_team("Core", &alice.id).unwrap();
//! assert!(team.has_member(&alice.id));
//! ```

pub mod atomic;
pub mod availability_store;
pub mod entry_store;
pub mod error;
pub mod team_store;
pub mod token_store;

pub use availability_store::AvailabilityStore;
pub use entry_store::EntryStore;
pub use error::{PersistenceError, Result};
pub use team_store::TeamStore;
pub use token_store::SyncTokenStore;
