//! Completions over OpenRouter.
//!
//! The assistant only ever sends a system prompt followed by conversation
//! turns and reads back the first choice's text, so that is the whole
//! surface here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ModelConfig, Purpose};
use crate::error::{AgentError, Result};

/// Environment variable holding the OpenRouter key.
pub const OPENROUTER_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

const COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Who said a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    System,
    User,
    Assistant,
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Speaker,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::Assistant,
            content: content.into(),
        }
    }

    /// True for turns a caller may supply; system prompts are ours.
    pub fn is_conversational(&self) -> bool {
        self.role != Speaker::System
    }
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<&'a ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct Completion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl Completion {
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
    }
}

/// Authenticated OpenRouter connection.
#[derive(Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: String,
}

impl OpenRouterClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Reads the key from `OPENROUTER_API_KEY`.
    ///
    /// # Errors
    /// [`AgentError::Configuration`] when the variable is unset or blank.
    pub fn from_env() -> Result<Self> {
        match std::env::var(OPENROUTER_API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(AgentError::Configuration(format!(
                "{} is not set",
                OPENROUTER_API_KEY_ENV
            ))),
        }
    }

    /// Sends `system` followed by `turns` and returns the reply text.
    pub async fn complete(
        &self,
        model: &ModelConfig,
        purpose: Purpose,
        system: &ChatMessage,
        turns: &[ChatMessage],
    ) -> Result<String> {
        let body = completion_body(model, purpose, system, turns);
        debug!(model = %model.model, ?purpose, turns = turns.len(), "Requesting completion");

        let response = self
            .http
            .post(COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .header("X-Title", "Team Brain")
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::ModelInvocation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AgentError::ModelInvocation(format!("{}: {}", status, detail)));
        }

        let completion: Completion = response
            .json()
            .await
            .map_err(|e| AgentError::ResponseParse(e.to_string()))?;
        completion
            .into_text()
            .ok_or_else(|| AgentError::ResponseParse("model returned no text".to_string()))
    }
}

fn completion_body<'a>(
    model: &'a ModelConfig,
    purpose: Purpose,
    system: &'a ChatMessage,
    turns: &'a [ChatMessage],
) -> CompletionBody<'a> {
    CompletionBody {
        model: &model.model,
        messages: std::iter::once(system).chain(turns).collect(),
        max_tokens: purpose.max_tokens(),
        temperature: purpose.temperature(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_wire_names() {
        let json = serde_json::to_value(ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json["role"], "assistant");

        let parsed: ChatMessage =
            serde_json::from_str(r#"{"role": "user", "content": "hello"}"#).unwrap();
        assert_eq!(parsed, ChatMessage::user("hello"));
        assert!(parsed.is_conversational());
        assert!(!ChatMessage::system("x").is_conversational());

        assert!(serde_json::from_str::<ChatMessage>(r#"{"role": "tool", "content": ""}"#).is_err());
    }

    #[test]
    fn test_completion_body_puts_system_first() {
        let model = ModelConfig::new("test-model");
        let system = ChatMessage::system("Classify.");
        let turns = [ChatMessage::user("buy milk")];

        let json =
            serde_json::to_value(completion_body(&model, Purpose::Classify, &system, &turns))
                .unwrap();
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "buy milk");
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["temperature"], 0.0);
    }

    #[test]
    fn test_completion_text() {
        let completion: Completion = serde_json::from_str(
            r#"{"id": "gen-1", "choices": [{"index": 0,
                "message": {"role": "assistant", "content": "Sure."},
                "finish_reason": "stop"}]}"#,
        )
        .unwrap();
        assert_eq!(completion.into_text().as_deref(), Some("Sure."));

        let empty: Completion = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(empty.into_text().is_none());

        let blank: Completion =
            serde_json::from_str(r#"{"choices": [{"message": {"content": "  "}}]}"#).unwrap();
        assert!(blank.into_text().is_none());
    }
}
