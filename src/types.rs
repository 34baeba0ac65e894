//! Standardized provider-boundary types.
//!
//! These types form the capability contract implemented by
//! [`LexaLanguageModel`](crate::providers::lexa::LexaLanguageModel): a
//! role-tagged multi-part prompt going in, and content/finish-reason/usage
//! coming out. They are provider-agnostic; the vendor wire shapes live in
//! [`crate::providers::lexa::types`].

use serde::{Deserialize, Serialize, Serializer};

use crate::utils::cancel::CancelHandle;

/// Message role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    /// Present in the standardized role set but not accepted by the Lexa
    /// wire format; the message mapper rejects it.
    Tool,
}

impl MessageRole {
    /// Lowercase wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

/// One typed unit of message content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentPart {
    /// Plain text.
    Text { text: String },

    /// A file/image data reference (URL or data URI). Mapped to the vendor's
    /// `image_url` wire shape.
    File { data: String },

    /// A tool invocation requested by the assistant.
    #[serde(rename = "tool-call")]
    ToolCall {
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        #[serde(rename = "toolName")]
        tool_name: String,
        /// Serialized JSON arguments, passed through verbatim.
        arguments: String,
    },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn file(data: impl Into<String>) -> Self {
        Self::File { data: data.into() }
    }

    pub fn tool_call(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self::ToolCall {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            arguments: arguments.into(),
        }
    }

    /// Kebab-case name of the part type, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::File { .. } => "file",
            Self::ToolCall { .. } => "tool-call",
        }
    }
}

/// Message content: plain text or an ordered part sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// A single prompt message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Parts(vec![ContentPart::text(text)]),
        }
    }

    pub fn user_with_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Parts(parts),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: MessageContent::Parts(vec![ContentPart::text(text)]),
        }
    }

    pub fn assistant_with_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: MessageContent::Parts(parts),
        }
    }
}

/// An ordered prompt.
pub type Prompt = Vec<ChatMessage>;

/// Enumerated reason a generation stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    /// Any vendor reason outside the fixed mapping table degrades to this
    /// instead of failing.
    Unknown,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Non-fatal notes attached to a call result (e.g. settings the vendor
/// silently ignores).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CallWarning {
    UnsupportedSetting { setting: String },
    Other { message: String },
}

/// A tool/function definition offered to the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON schema of the tool parameters.
    pub parameters: serde_json::Value,
}

/// Tool selection policy, serialized to the vendor's wire shape
/// (`"auto"`, `"none"`, or a function selector object).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolChoice {
    Auto,
    None,
    Tool { name: String },
}

impl Serialize for ToolChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::None => serializer.serialize_str("none"),
            Self::Tool { name } => serde_json::json!({
                "type": "function",
                "function": { "name": name },
            })
            .serialize(serializer),
        }
    }
}

/// Per-call options for [`LanguageModel`](crate::traits::LanguageModel).
///
/// Tunables left as `None` fall back to the provider settings, then to the
/// hard-coded defaults of the request builder.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub prompt: Prompt,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub stop_sequences: Option<Vec<String>>,
    pub tools: Option<Vec<Tool>>,
    pub tool_choice: Option<ToolChoice>,
    /// Cooperative cancellation signal; triggering it aborts the in-flight
    /// request and stops further stream emission.
    pub cancel: Option<CancelHandle>,
}

impl CallOptions {
    pub fn new(prompt: Prompt) -> Self {
        Self {
            prompt,
            ..Self::default()
        }
    }
}

/// Result of a non-streaming generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResult {
    /// Ordered output content (text and tool-call parts).
    pub content: Vec<ContentPart>,
    pub finish_reason: FinishReason,
    pub usage: Usage,
    pub warnings: Vec<CallWarning>,
}

impl GenerateResult {
    /// The first text part of the output, if any.
    pub fn text(&self) -> Option<&str> {
        self.content.iter().find_map(|part| match part {
            ContentPart::Text { text } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_choice_serializes_to_wire_shapes() {
        assert_eq!(
            serde_json::to_value(ToolChoice::Auto).unwrap(),
            serde_json::json!("auto")
        );
        assert_eq!(
            serde_json::to_value(ToolChoice::None).unwrap(),
            serde_json::json!("none")
        );
        assert_eq!(
            serde_json::to_value(ToolChoice::Tool {
                name: "search".to_string()
            })
            .unwrap(),
            serde_json::json!({"type": "function", "function": {"name": "search"}})
        );
    }

    #[test]
    fn message_content_untagged_roundtrip() {
        let text: MessageContent = serde_json::from_value(serde_json::json!("hello")).unwrap();
        assert_eq!(text, MessageContent::Text("hello".to_string()));

        let parts: MessageContent =
            serde_json::from_value(serde_json::json!([{"type": "text", "text": "hi"}])).unwrap();
        assert_eq!(
            parts,
            MessageContent::Parts(vec![ContentPart::text("hi")])
        );
    }

    #[test]
    fn part_kinds_name_the_offending_type() {
        assert_eq!(ContentPart::text("x").kind(), "text");
        assert_eq!(ContentPart::file("u").kind(), "file");
        assert_eq!(ContentPart::tool_call("1", "t", "{}").kind(), "tool-call");
    }

    #[test]
    fn generate_result_text_returns_first_text_part() {
        let result = GenerateResult {
            content: vec![
                ContentPart::tool_call("1", "t", "{}"),
                ContentPart::text("answer"),
            ],
            finish_reason: FinishReason::Stop,
            usage: Usage::default(),
            warnings: vec![],
        };
        assert_eq!(result.text(), Some("answer"));
    }
}
