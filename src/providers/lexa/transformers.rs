//! Request/response transformation between the standardized provider
//! boundary and the Lexa wire format.
//!
//! All functions here are pure: message mapping and request building never
//! touch the network, and the finish-reason table is total (unknown vendor
//! reasons degrade to [`FinishReason::Unknown`] instead of failing).

use crate::error::LlmError;
use crate::types::{
    CallOptions, CallWarning, ChatMessage, ContentPart, FinishReason, GenerateResult,
    MessageContent, MessageRole, Tool, Usage,
};

use super::LexaSettings;
use super::types::{
    LexaContentPart, LexaFunctionCall, LexaFunctionSpec, LexaImageUrl, LexaMessage,
    LexaMessageContent, LexaRequest, LexaResponse, LexaTool, LexaToolCall, LexaUsage,
};

/// Hard-coded tunable defaults, applied when neither the call options nor the
/// provider settings supply a value.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Convert standardized messages to the vendor shape.
///
/// Total and order-preserving: the output has exactly one vendor message per
/// input message, in input order. Unsupported parts and roles are hard
/// failures naming the offender; nothing is silently dropped.
pub fn convert_messages(messages: &[ChatMessage]) -> Result<Vec<LexaMessage>, LlmError> {
    messages.iter().map(convert_message).collect()
}

fn convert_message(message: &ChatMessage) -> Result<LexaMessage, LlmError> {
    match message.role {
        MessageRole::System => Ok(LexaMessage {
            role: "system".to_string(),
            content: system_content(&message.content)?,
        }),
        MessageRole::User => Ok(LexaMessage {
            role: "user".to_string(),
            content: LexaMessageContent::Parts(convert_parts(&message.content, user_part)?),
        }),
        MessageRole::Assistant => Ok(LexaMessage {
            role: "assistant".to_string(),
            content: LexaMessageContent::Parts(convert_parts(&message.content, assistant_part)?),
        }),
        MessageRole::Tool => Err(LlmError::UnsupportedRole("tool".to_string())),
    }
}

/// System messages carry plain text verbatim. Multi-part system content is
/// flattened by concatenating its text parts in order; any non-text part is
/// rejected.
fn system_content(content: &MessageContent) -> Result<LexaMessageContent, LlmError> {
    match content {
        MessageContent::Text(text) => Ok(LexaMessageContent::Text(text.clone())),
        MessageContent::Parts(parts) => {
            let mut text = String::new();
            for part in parts {
                match part {
                    ContentPart::Text { text: t } => text.push_str(t),
                    other => {
                        return Err(LlmError::UnsupportedContentType(other.kind().to_string()));
                    }
                }
            }
            Ok(LexaMessageContent::Text(text))
        }
    }
}

fn convert_parts(
    content: &MessageContent,
    convert: fn(&ContentPart) -> Result<LexaContentPart, LlmError>,
) -> Result<Vec<LexaContentPart>, LlmError> {
    match content {
        MessageContent::Text(text) => Ok(vec![LexaContentPart::Text { text: text.clone() }]),
        MessageContent::Parts(parts) => parts.iter().map(convert).collect(),
    }
}

fn user_part(part: &ContentPart) -> Result<LexaContentPart, LlmError> {
    match part {
        ContentPart::Text { text } => Ok(LexaContentPart::Text { text: text.clone() }),
        ContentPart::File { data } => Ok(LexaContentPart::ImageUrl {
            image_url: LexaImageUrl { url: data.clone() },
        }),
        other => Err(LlmError::UnsupportedContentType(other.kind().to_string())),
    }
}

fn assistant_part(part: &ContentPart) -> Result<LexaContentPart, LlmError> {
    match part {
        ContentPart::Text { text } => Ok(LexaContentPart::Text { text: text.clone() }),
        ContentPart::ToolCall {
            tool_call_id,
            tool_name,
            arguments,
        } => Ok(LexaContentPart::ToolCall {
            tool_call: LexaToolCall {
                id: tool_call_id.clone(),
                function: LexaFunctionCall {
                    name: tool_name.clone(),
                    arguments: arguments.clone(),
                },
            },
        }),
        other => Err(LlmError::UnsupportedContentType(other.kind().to_string())),
    }
}

/// Map a vendor finish reason onto the standardized enumeration. Total over
/// all input strings.
pub fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "tool_calls" => FinishReason::ToolCalls,
        _ => FinishReason::Unknown,
    }
}

/// Build the vendor request body from call options and provider settings.
///
/// Each tunable resolves call-site value first, then the stored setting, then
/// the hard-coded default. `stream` is always `false` here; the streaming
/// path flips the flag on a clone of the built request.
pub fn build_request(
    model_id: &str,
    options: &CallOptions,
    settings: &LexaSettings,
) -> Result<(LexaRequest, Vec<CallWarning>), LlmError> {
    let mut warnings = Vec::new();

    if options.tool_choice.is_some() && options.tools.is_none() {
        warnings.push(CallWarning::UnsupportedSetting {
            setting: "tool_choice without tools".to_string(),
        });
    }

    let request = LexaRequest {
        model: model_id.to_string(),
        messages: convert_messages(&options.prompt)?,
        temperature: options
            .temperature
            .or(settings.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE),
        max_tokens: options
            .max_tokens
            .or(settings.max_tokens)
            .unwrap_or(DEFAULT_MAX_TOKENS),
        stop: options
            .stop_sequences
            .clone()
            .or_else(|| settings.stop_sequences.clone()),
        stream: false,
        tools: options
            .tools
            .as_ref()
            .map(|tools| tools.iter().map(prepare_tool).collect()),
        tool_choice: options.tool_choice.clone(),
    };

    Ok((request, warnings))
}

fn prepare_tool(tool: &Tool) -> LexaTool {
    LexaTool {
        r#type: "function".to_string(),
        function: LexaFunctionSpec {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.parameters.clone(),
        },
    }
}

/// Project the vendor response onto the standardized generate result.
pub fn parse_response(
    response: LexaResponse,
    warnings: Vec<CallWarning>,
) -> Result<GenerateResult, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::ParseError("no choices in response".to_string()))?;

    let mut content = Vec::new();
    match choice.message.content {
        Some(LexaMessageContent::Text(text)) => {
            if !text.is_empty() {
                content.push(ContentPart::Text { text });
            }
        }
        Some(LexaMessageContent::Parts(parts)) => {
            for part in parts {
                match part {
                    LexaContentPart::Text { text } => {
                        if !text.is_empty() {
                            content.push(ContentPart::Text { text });
                        }
                    }
                    LexaContentPart::ToolCall { tool_call } => {
                        content.push(ContentPart::ToolCall {
                            tool_call_id: tool_call.id,
                            tool_name: tool_call.function.name,
                            arguments: tool_call.function.arguments,
                        });
                    }
                    // The vendor never echoes image parts back; skip if it does.
                    LexaContentPart::ImageUrl { .. } => {}
                }
            }
        }
        None => {}
    }

    let finish_reason = map_finish_reason(choice.finish_reason.as_deref().unwrap_or(""));

    Ok(GenerateResult {
        content,
        finish_reason,
        usage: response.usage.map(convert_usage).unwrap_or_default(),
        warnings,
    })
}

pub(crate) fn convert_usage(usage: LexaUsage) -> Usage {
    Usage {
        prompt_tokens: usage.prompt_tokens.unwrap_or(0),
        completion_tokens: usage.completion_tokens.unwrap_or(0),
        total_tokens: usage.total_tokens.unwrap_or(0),
    }
}
