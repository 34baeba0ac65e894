//! Lexa wire types.
//!
//! These structs mirror the vendor's chat-completion JSON shapes exactly.
//! They are built fresh per call and never retained. The "string or
//! part-array" message content field is an explicit untagged variant
//! ([`LexaMessageContent`]) resolved once at the mapper boundary instead of
//! an untyped value threaded through the adapter.

use serde::{Deserialize, Serialize};

use crate::types::ToolChoice;

/// A message in the vendor request shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LexaMessage {
    pub role: String,
    pub content: LexaMessageContent,
}

/// Vendor message content: a bare string (system/assistant) or a typed part
/// array (user/assistant).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LexaMessageContent {
    Text(String),
    Parts(Vec<LexaContentPart>),
}

/// One typed vendor content part.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LexaContentPart {
    Text { text: String },
    ImageUrl { image_url: LexaImageUrl },
    ToolCall { tool_call: LexaToolCall },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LexaImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LexaToolCall {
    pub id: String,
    pub function: LexaFunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LexaFunctionCall {
    pub name: String,
    pub arguments: String,
}

/// A tool definition in the vendor request shape.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LexaTool {
    pub r#type: String,
    pub function: LexaFunctionSpec,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LexaFunctionSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: serde_json::Value,
}

/// The chat-completion request body.
///
/// The base builder always sets `stream: false`; the streaming path clones
/// the built request and overrides only that flag.
#[derive(Debug, Clone, Serialize)]
pub struct LexaRequest {
    pub model: String,
    pub messages: Vec<LexaMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<LexaTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

/// The non-streaming chat-completion response body.
#[derive(Debug, Clone, Deserialize)]
pub struct LexaResponse {
    pub choices: Vec<LexaChoice>,
    pub usage: Option<LexaUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LexaChoice {
    pub message: LexaResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LexaResponseMessage {
    #[allow(dead_code)]
    pub role: Option<String>,
    pub content: Option<LexaMessageContent>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LexaUsage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

/// One parsed streaming chunk (the JSON payload of a single SSE `data:` line).
#[derive(Debug, Clone, Deserialize)]
pub struct LexaStreamChunk {
    pub choices: Option<Vec<LexaStreamChoice>>,
    pub usage: Option<LexaUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LexaStreamChoice {
    pub delta: Option<LexaStreamDelta>,
    #[allow(dead_code)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LexaStreamDelta {
    #[allow(dead_code)]
    pub role: Option<String>,
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_part_wire_tags() {
        let text = serde_json::to_value(LexaContentPart::Text {
            text: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(text, serde_json::json!({"type": "text", "text": "hi"}));

        let image = serde_json::to_value(LexaContentPart::ImageUrl {
            image_url: LexaImageUrl {
                url: "data:img".to_string(),
            },
        })
        .unwrap();
        assert_eq!(
            image,
            serde_json::json!({"type": "image_url", "image_url": {"url": "data:img"}})
        );

        let tool = serde_json::to_value(LexaContentPart::ToolCall {
            tool_call: LexaToolCall {
                id: "call_1".to_string(),
                function: LexaFunctionCall {
                    name: "search".to_string(),
                    arguments: "{}".to_string(),
                },
            },
        })
        .unwrap();
        assert_eq!(
            tool,
            serde_json::json!({
                "type": "tool_call",
                "tool_call": {"id": "call_1", "function": {"name": "search", "arguments": "{}"}}
            })
        );
    }

    #[test]
    fn response_content_accepts_string_or_parts() {
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "ok"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 1, "completion_tokens": 2, "total_tokens": 3}
        });
        let response: LexaResponse = serde_json::from_value(body).unwrap();
        assert!(matches!(
            response.choices[0].message.content,
            Some(LexaMessageContent::Text(_))
        ));

        let body = serde_json::json!({
            "choices": [{
                "message": {"role": "assistant", "content": [{"type": "text", "text": "ok"}]},
                "finish_reason": "stop"
            }]
        });
        let response: LexaResponse = serde_json::from_value(body).unwrap();
        assert!(matches!(
            response.choices[0].message.content,
            Some(LexaMessageContent::Parts(_))
        ));
    }

    #[test]
    fn absent_request_tools_serialize_as_missing_field() {
        let request = LexaRequest {
            model: "lexa-x1".to_string(),
            messages: vec![],
            temperature: 0.7,
            max_tokens: 1000,
            stop: None,
            stream: false,
            tools: None,
            tool_choice: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
        assert!(value.get("tool_choice").is_none());
        assert!(value.get("stop").is_none());
        assert_eq!(value["stream"], serde_json::json!(false));
    }
}
