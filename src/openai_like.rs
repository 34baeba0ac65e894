//! OpenAI-shaped convenience facade.
//!
//! [`Lexa`] wraps the provider behind the familiar chat-completion request
//! shape: string roles, string content, an optional `stream` flag. It is a
//! thin projection. Every call is translated into the standardized
//! [`CallOptions`](crate::types::CallOptions) and routed through the same
//! [`LanguageModel`](crate::traits::LanguageModel) path as direct users.

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::providers::lexa::models::{CATALOG_IDS, DEFAULT_MODEL_ID};
use crate::providers::lexa::{LexaConfig, LexaProvider, LexaSettings, PROVIDER_ID};
use crate::stream::EventStream;
use crate::traits::LanguageModel;
use crate::types::{
    CallOptions, ChatMessage, ContentPart, FinishReason, MessageContent, MessageRole, Usage,
};

/// One chat message in the facade's wire shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionMessage {
    pub role: String,
    pub content: String,
}

impl ChatCompletionMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// A chat-completion request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatCompletionMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// One completed choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatChoice {
    pub message: ChatCompletionMessage,
    pub finish_reason: FinishReason,
}

/// A finished (non-streaming) chat completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletion {
    pub choices: Vec<ChatChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletion {
    /// Text of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// Outcome of [`Lexa::chat`]: completed data or a live event stream,
/// depending on the resolved stream flag.
pub enum ChatOutcome {
    Completion(ChatCompletion),
    Stream(EventStream),
}

/// One catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelEntry {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub owned_by: String,
}

/// The model catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<ModelEntry>,
}

/// The OpenAI-shaped Lexa client.
#[derive(Clone)]
pub struct Lexa {
    provider: LexaProvider,
}

impl Lexa {
    /// Build a client with the default base URL and settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            provider: LexaProvider::new(LexaConfig::new(api_key)),
        }
    }

    pub fn with_config(config: LexaConfig) -> Self {
        Self {
            provider: LexaProvider::new(config),
        }
    }

    pub fn with_settings(config: LexaConfig, settings: LexaSettings) -> Self {
        Self {
            provider: LexaProvider::with_settings(config, settings),
        }
    }

    /// Run a chat completion. The stream flag resolves request-first, then
    /// the provider's `enable_streaming` setting, then off.
    pub async fn chat(&self, request: ChatCompletionRequest) -> Result<ChatOutcome, LlmError> {
        let model_id = request
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());
        let streaming = request
            .stream
            .or(self.provider.settings().enable_streaming)
            .unwrap_or(false);

        let options = CallOptions {
            prompt: convert_facade_messages(&request.messages)?,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            ..CallOptions::default()
        };

        let model = self.provider.language_model(model_id);
        if streaming {
            let stream = model.stream(options).await?;
            return Ok(ChatOutcome::Stream(stream));
        }

        let result = model.generate(options).await?;
        Ok(ChatOutcome::Completion(ChatCompletion {
            choices: vec![ChatChoice {
                message: ChatCompletionMessage::new(
                    MessageRole::Assistant.as_str(),
                    result.text().unwrap_or_default(),
                ),
                finish_reason: result.finish_reason,
            }],
            usage: Some(result.usage),
        }))
    }

    /// List the model catalog. Served from static data; no network call.
    pub async fn models(&self) -> Result<ModelList, LlmError> {
        let created = chrono::Utc::now().timestamp();
        Ok(ModelList {
            object: "list".to_string(),
            data: CATALOG_IDS
                .iter()
                .map(|id| ModelEntry {
                    id: (*id).to_string(),
                    object: "model".to_string(),
                    created,
                    owned_by: PROVIDER_ID.to_string(),
                })
                .collect(),
        })
    }
}

/// Map the facade's string-role messages onto standardized prompt messages.
/// Unknown role strings are a hard failure.
fn convert_facade_messages(
    messages: &[ChatCompletionMessage],
) -> Result<Vec<ChatMessage>, LlmError> {
    messages
        .iter()
        .map(|message| {
            let role = match message.role.as_str() {
                "system" => MessageRole::System,
                "user" => MessageRole::User,
                "assistant" => MessageRole::Assistant,
                "tool" => MessageRole::Tool,
                other => return Err(LlmError::UnsupportedRole(other.to_string())),
            };
            Ok(ChatMessage {
                role,
                content: MessageContent::Parts(vec![ContentPart::text(message.content.clone())]),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_messages_map_known_roles() {
        let prompt = convert_facade_messages(&[
            ChatCompletionMessage::new("system", "be brief"),
            ChatCompletionMessage::new("user", "hi"),
            ChatCompletionMessage::new("assistant", "hello"),
        ])
        .unwrap();

        assert_eq!(prompt.len(), 3);
        assert_eq!(prompt[0].role, MessageRole::System);
        assert_eq!(prompt[1].role, MessageRole::User);
        assert_eq!(prompt[2].role, MessageRole::Assistant);
    }

    #[test]
    fn unknown_role_string_is_rejected() {
        let err = convert_facade_messages(&[ChatCompletionMessage::new("narrator", "then...")])
            .unwrap_err();
        match err {
            LlmError::UnsupportedRole(role) => assert_eq!(role, "narrator"),
            other => panic!("expected unsupported role, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn models_lists_catalog_without_network() {
        let client = Lexa::new("sk-test");
        let list = client.models().await.unwrap();

        assert_eq!(list.object, "list");
        let ids: Vec<&str> = list.data.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, CATALOG_IDS);
        assert!(list.data.iter().all(|entry| entry.object == "model"));
        assert!(list.data.iter().all(|entry| entry.owned_by == "lexa"));
    }

    #[test]
    fn completion_text_reads_first_choice() {
        let completion = ChatCompletion {
            choices: vec![ChatChoice {
                message: ChatCompletionMessage::new("assistant", "ok"),
                finish_reason: FinishReason::Stop,
            }],
            usage: None,
        };
        assert_eq!(completion.text(), Some("ok"));
    }
}
