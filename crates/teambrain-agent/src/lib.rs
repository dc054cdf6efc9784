//! Assistant capability for Team Brain.
//!
//! The [`Assistant`] trait covers two things: classifying free-form text
//! into a structured [`Entry`], and replying within a conversation.
//! [`OpenRouterAssistant`] implements both over the OpenRouter
//! chat-completions API.

pub mod assistant;
pub mod client;
pub mod config;
pub mod entry;
pub mod error;

pub use assistant::{Assistant, OpenRouterAssistant};
pub use client::{ChatMessage, OpenRouterClient, Speaker, OPENROUTER_API_KEY_ENV};
pub use config::{ModelConfig, Purpose};
pub use entry::{parse_entry, Category, Entry};
pub use error::{AgentError, Result};
