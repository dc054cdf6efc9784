//! API request handlers.

pub mod assistant;
pub mod entries;
pub mod health;
pub mod members;
pub mod sync;
pub mod teams;

pub use assistant::*;
pub use entries::*;
pub use health::*;
pub use members::*;
pub use sync::*;
pub use teams::*;
