//! HTTP API for Team Brain.
//!
//! - Health check
//! - Team availability search and meeting booking (member API key)
//! - Calendar sync reports from members' assistants (one-time sync token)
//! - Text classification and chat, when an assistant is configured
//!
//! # Example
//!
//! ```ignore
//! use teambrain_api::{serve, ApiConfig, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = AppState::open(/* ... */);
//!     serve(ApiConfig::default(), state).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use auth::AuthContext;
pub use config::{ApiConfig, CorsPolicy};
pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::{AppState, SyncMode};
