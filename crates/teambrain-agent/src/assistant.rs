//! The assistant capability and its OpenRouter implementation.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::client::{ChatMessage, OpenRouterClient, Speaker};
use crate::config::{ModelConfig, Purpose};
use crate::entry::{parse_entry, Category, Entry};
use crate::error::{AgentError, Result};

const CONVERSATION_PROMPT: &str = "You are Team Brain, a concise assistant that helps a \
team organize tasks, ideas, notes and meetings. Answer plainly and flag anything \
time-sensitive.";

/// Classifies text and holds conversations.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Turns free-form text into a structured entry.
    async fn classify(&self, text: &str) -> Result<Entry>;

    /// Replies to the last message of a conversation.
    async fn respond(&self, conversation: &[ChatMessage]) -> Result<String>;
}

/// Assistant backed by an OpenRouter-hosted model.
#[derive(Clone)]
pub struct OpenRouterAssistant {
    client: OpenRouterClient,
    config: ModelConfig,
}

impl OpenRouterAssistant {
    pub fn new(client: OpenRouterClient, config: ModelConfig) -> Self {
        Self { client, config }
    }

    /// Builds an assistant from `OPENROUTER_API_KEY` and `TEAMBRAIN_MODEL`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(OpenRouterClient::from_env()?, ModelConfig::from_env()))
    }
}

/// System prompt asking for a JSON classification.
pub fn classification_prompt() -> String {
    let names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
    format!(
        "Classify the user's text into exactly one category: {}. \
         Reply with a single JSON object and nothing else. It must contain \
         \"category\", \"title\" and a one-sentence \"summary\", plus any fields \
         that fit the category (for example priority and due_date for a task, \
         attendees and action_items for a meeting, tags for anything).",
        names.join(", ")
    )
}

#[async_trait]
impl Assistant for OpenRouterAssistant {
    #[instrument(skip_all, fields(chars = text.len()))]
    async fn classify(&self, text: &str) -> Result<Entry> {
        if text.trim().is_empty() {
            return Err(AgentError::InvalidInput("text is empty".to_string()));
        }

        let reply = self
            .client
            .complete(
                &self.config,
                Purpose::Classify,
                &ChatMessage::system(classification_prompt()),
                &[ChatMessage::user(text)],
            )
            .await?;

        let entry = parse_entry(&reply, text)?;
        debug!(category = %entry.category, "Classified text");
        Ok(entry)
    }

    #[instrument(skip_all, fields(turns = conversation.len()))]
    async fn respond(&self, conversation: &[ChatMessage]) -> Result<String> {
        if !conversation.last().is_some_and(|m| m.role == Speaker::User) {
            return Err(AgentError::InvalidInput(
                "conversation must end with a user message".to_string(),
            ));
        }

        let turns: Vec<ChatMessage> = conversation
            .iter()
            .filter(|m| m.is_conversational())
            .cloned()
            .collect();

        self.client
            .complete(
                &self.config,
                Purpose::Converse,
                &ChatMessage::system(CONVERSATION_PROMPT),
                &turns,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant() -> OpenRouterAssistant {
        OpenRouterAssistant::new(OpenRouterClient::new("test-key"), ModelConfig::default())
    }

    #[test]
    fn test_classification_prompt_lists_categories() {
        let prompt = classification_prompt();
        for category in Category::ALL {
            assert!(prompt.contains(category.as_str()));
        }
    }

    #[tokio::test]
    async fn test_classify_rejects_empty_text() {
        let err = assistant().classify("   ").await.unwrap_err();
        assert!(matches!(err, AgentError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_respond_requires_trailing_user_message() {
        let err = assistant().respond(&[]).await.unwrap_err();
        assert!(matches!(err, AgentError::InvalidInput(_)));

        let conversation = [ChatMessage::user("hi"), ChatMessage::assistant("hello")];
        let err = assistant().respond(&conversation).await.unwrap_err();
        assert!(matches!(err, AgentError::InvalidInput(_)));
    }
}
