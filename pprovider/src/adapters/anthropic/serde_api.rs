//! Anthropic Messages API payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ProviderError, ToolCall};

use super::types::{
    AnthropicContent, AnthropicMessage, AnthropicRequest, AnthropicResponse, AnthropicStopReason,
    AnthropicTool, AnthropicUsage,
};

pub(crate) fn build_api_request(
    request: AnthropicRequest,
) -> Result<AnthropicApiRequest, ProviderError> {
    if request.messages.is_empty() {
        return Err(ProviderError::invalid_request(
            "Anthropic request requires at least one message",
        ));
    }

    if request.max_tokens == 0 {
        return Err(ProviderError::invalid_request(
            "Anthropic request requires max_tokens greater than zero",
        ));
    }

    let messages = request
        .messages
        .into_iter()
        .map(AnthropicApiMessage::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let tools = if request.tools.is_empty() {
        None
    } else {
        Some(
            request
                .tools
                .into_iter()
                .map(AnthropicApiTool::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        )
    };

    Ok(AnthropicApiRequest {
        model: request.model,
        max_tokens: request.max_tokens,
        system: request.system,
        messages,
        tools,
        temperature: request.temperature,
    })
}

pub(crate) fn parse_stop_reason(value: Option<&str>) -> AnthropicStopReason {
    match value {
        Some("end_turn") => AnthropicStopReason::EndTurn,
        Some("stop_sequence") => AnthropicStopReason::StopSequence,
        Some("max_tokens") => AnthropicStopReason::MaxTokens,
        Some("tool_use") => AnthropicStopReason::ToolUse,
        Some("refusal") => AnthropicStopReason::Refusal,
        _ => AnthropicStopReason::Other,
    }
}

fn parse_tool_input(arguments: &str) -> Result<Value, ProviderError> {
    if arguments.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_str(arguments).map_err(|_| {
        ProviderError::invalid_request("Anthropic tool_use input must be valid JSON")
    })
}

#[derive(Debug, Serialize)]
pub(crate) struct AnthropicApiRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<AnthropicApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<AnthropicApiTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnthropicApiMessage {
    pub role: String,
    pub content: Vec<AnthropicApiContentBlock>,
}

impl TryFrom<AnthropicMessage> for AnthropicApiMessage {
    type Error = ProviderError;

    fn try_from(value: AnthropicMessage) -> Result<Self, Self::Error> {
        let content = value
            .content
            .into_iter()
            .map(AnthropicApiContentBlock::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        if content.is_empty() {
            return Err(ProviderError::invalid_request(
                "Anthropic message content must not be empty",
            ));
        }

        Ok(Self {
            role: value.role.as_str().to_string(),
            content,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum AnthropicApiContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
    },
}

impl TryFrom<AnthropicContent> for AnthropicApiContentBlock {
    type Error = ProviderError;

    fn try_from(value: AnthropicContent) -> Result<Self, Self::Error> {
        match value {
            AnthropicContent::Text(text) => {
                if text.trim().is_empty() {
                    return Err(ProviderError::invalid_request(
                        "Anthropic text content must not be empty",
                    ));
                }
                Ok(Self::Text { text })
            }
            AnthropicContent::ToolUse(call) => Ok(Self::ToolUse {
                input: parse_tool_input(&call.arguments)?,
                id: call.id,
                name: call.name,
            }),
            AnthropicContent::ToolResult {
                tool_use_id,
                content,
            } => Ok(Self::ToolResult {
                tool_use_id,
                content,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AnthropicApiTool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl TryFrom<AnthropicTool> for AnthropicApiTool {
    type Error = ProviderError;

    fn try_from(value: AnthropicTool) -> Result<Self, Self::Error> {
        let input_schema = serde_json::from_str::<Value>(&value.input_schema).map_err(|_| {
            ProviderError::invalid_request("Anthropic tool schema must be valid JSON")
        })?;

        Ok(Self {
            name: value.name,
            description: value.description,
            input_schema,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnthropicApiResponse {
    pub model: String,
    pub content: Vec<AnthropicApiResponseBlock>,
    pub stop_reason: Option<String>,
    pub usage: Option<AnthropicApiUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum AnthropicApiResponseBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnthropicApiUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl From<AnthropicApiResponse> for AnthropicResponse {
    fn from(value: AnthropicApiResponse) -> Self {
        let content = value
            .content
            .into_iter()
            .filter_map(|block| match block {
                AnthropicApiResponseBlock::Text { text } => Some(AnthropicContent::Text(text)),
                AnthropicApiResponseBlock::ToolUse { id, name, input } => {
                    Some(AnthropicContent::ToolUse(ToolCall {
                        id,
                        name,
                        arguments: input.to_string(),
                    }))
                }
                AnthropicApiResponseBlock::Other => None,
            })
            .collect();

        let usage = value
            .usage
            .map(|usage| AnthropicUsage {
                input_tokens: usage.input_tokens,
                output_tokens: usage.output_tokens,
            })
            .unwrap_or_default();

        Self {
            model: value.model,
            content,
            stop_reason: parse_stop_reason(value.stop_reason.as_deref()),
            usage,
        }
    }
}
