//! Error types for the agent crate.

use thiserror::Error;

/// Errors that can occur in assistant operations.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Model invocation failed.
    #[error("model invocation failed: {0}")]
    ModelInvocation(String),

    /// Response parsing failed.
    #[error("failed to parse response: {0}")]
    ResponseParse(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Input rejected before reaching the model.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AgentError::Configuration("Missing OPENROUTER_API_KEY".into());
        assert_eq!(
            err.to_string(),
            "configuration error: Missing OPENROUTER_API_KEY"
        );

        let err = AgentError::ResponseParse("not json".into());
        assert_eq!(err.to_string(), "failed to parse response: not json");
    }
}
