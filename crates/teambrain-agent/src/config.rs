//! Model selection for the assistant.

/// Environment variable overriding the model id.
pub const MODEL_ENV: &str = "TEAMBRAIN_MODEL";

/// Model used when `TEAMBRAIN_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "anthropic/claude-sonnet-4";

/// The two kinds of completion the assistant asks for.
///
/// Classification wants a short, deterministic JSON object; conversation
/// gets room and some variety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Classify,
    Converse,
}

impl Purpose {
    pub fn max_tokens(self) -> u32 {
        match self {
            Purpose::Classify => 1024,
            Purpose::Converse => 2048,
        }
    }

    pub fn temperature(self) -> f32 {
        match self {
            Purpose::Classify => 0.0,
            Purpose::Converse => 0.7,
        }
    }
}

/// Which hosted model answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub model: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl ModelConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    /// Reads `TEAMBRAIN_MODEL`, falling back to [`DEFAULT_MODEL`] when it is
    /// unset or blank.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(MODEL_ENV).ok())
    }

    fn from_value(value: Option<String>) -> Self {
        match value {
            Some(model) if !model.trim().is_empty() => Self::new(model.trim()),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_from_value() {
        assert_eq!(ModelConfig::from_value(None).model, DEFAULT_MODEL);
        assert_eq!(ModelConfig::from_value(Some("  ".into())).model, DEFAULT_MODEL);
        assert_eq!(
            ModelConfig::from_value(Some(" openai/gpt-4o ".into())).model,
            "openai/gpt-4o"
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        assert_eq!(Purpose::Classify.temperature(), 0.0);
        assert!(Purpose::Classify.max_tokens() < Purpose::Converse.max_tokens());
    }
}
