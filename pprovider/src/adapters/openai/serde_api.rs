//! Chat Completions wire format.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ProviderError, TokenUsage, ToolCall, ToolDefinition};

use super::types::{OpenAiFinishReason, OpenAiMessage, OpenAiRequest, OpenAiResponse};

/// Reasoning-era models reject `max_tokens` and expect `max_completion_tokens`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpenAiTokenParameter {
    MaxTokens,
    MaxCompletionTokens,
}

impl OpenAiTokenParameter {
    pub(crate) fn for_model(model: &str) -> Self {
        let model = model.trim().to_ascii_lowercase();
        let reasoning = ["o1", "o3", "o4", "gpt-5"]
            .iter()
            .any(|prefix| model.starts_with(prefix));

        if reasoning {
            Self::MaxCompletionTokens
        } else {
            Self::MaxTokens
        }
    }
}

pub(crate) fn build_api_request(request: OpenAiRequest) -> Result<OpenAiApiRequest, ProviderError> {
    let token_parameter = OpenAiTokenParameter::for_model(&request.model);
    build_api_request_with_token_parameter(request, token_parameter)
}

pub(crate) fn build_api_request_with_token_parameter(
    request: OpenAiRequest,
    token_parameter: OpenAiTokenParameter,
) -> Result<OpenAiApiRequest, ProviderError> {
    if request.messages.is_empty() {
        return Err(ProviderError::invalid_request(
            "OpenAI request requires at least one message",
        ));
    }

    let messages = request
        .messages
        .into_iter()
        .map(OpenAiApiMessage::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let tools = request
        .tools
        .into_iter()
        .map(OpenAiApiTool::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let (max_tokens, max_completion_tokens) = match token_parameter {
        OpenAiTokenParameter::MaxTokens => (request.max_tokens, None),
        OpenAiTokenParameter::MaxCompletionTokens => (None, request.max_tokens),
    };

    Ok(OpenAiApiRequest {
        model: request.model,
        messages,
        tools,
        temperature: request.temperature,
        max_tokens,
        max_completion_tokens,
    })
}

pub(crate) fn parse_finish_reason(value: Option<&str>) -> OpenAiFinishReason {
    match value {
        Some("stop") => OpenAiFinishReason::Stop,
        Some("length") => OpenAiFinishReason::Length,
        Some("tool_calls" | "function_call") => OpenAiFinishReason::ToolCalls,
        Some("content_filter") => OpenAiFinishReason::ContentFilter,
        _ => OpenAiFinishReason::Other,
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OpenAiApiRequest {
    pub model: String,
    pub messages: Vec<OpenAiApiMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<OpenAiApiTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub(crate) enum OpenAiApiMessage {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<OpenAiApiToolCall>,
    },
    Tool {
        tool_call_id: String,
        content: String,
    },
}

fn require_text(role: &str, content: String) -> Result<String, ProviderError> {
    if content.trim().is_empty() {
        return Err(ProviderError::invalid_request(format!(
            "OpenAI {role} message content must not be empty"
        )));
    }
    Ok(content)
}

impl TryFrom<OpenAiMessage> for OpenAiApiMessage {
    type Error = ProviderError;

    fn try_from(value: OpenAiMessage) -> Result<Self, Self::Error> {
        Ok(match value {
            OpenAiMessage::System(content) => Self::System {
                content: require_text("system", content)?,
            },
            OpenAiMessage::User(content) => Self::User {
                content: require_text("user", content)?,
            },
            OpenAiMessage::Assistant {
                content,
                tool_calls,
            } => {
                let content = (!content.trim().is_empty()).then_some(content);
                if content.is_none() && tool_calls.is_empty() {
                    return Err(ProviderError::invalid_request(
                        "OpenAI assistant message needs content or tool calls",
                    ));
                }

                Self::Assistant {
                    content,
                    tool_calls: tool_calls.into_iter().map(OpenAiApiToolCall::from).collect(),
                }
            }
            OpenAiMessage::Tool {
                tool_call_id,
                content,
            } => Self::Tool {
                tool_call_id,
                content,
            },
        })
    }
}

fn function_kind() -> String {
    "function".to_string()
}

/// Tool call as both sent back in history and received in a reply.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct OpenAiApiToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    pub function: OpenAiApiFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct OpenAiApiFunctionCall {
    pub name: String,
    pub arguments: String,
}

impl From<ToolCall> for OpenAiApiToolCall {
    fn from(value: ToolCall) -> Self {
        let arguments = if value.arguments.trim().is_empty() {
            "{}".to_string()
        } else {
            value.arguments
        };

        Self {
            id: value.id,
            kind: function_kind(),
            function: OpenAiApiFunctionCall {
                name: value.name,
                arguments,
            },
        }
    }
}

impl From<OpenAiApiToolCall> for ToolCall {
    fn from(value: OpenAiApiToolCall) -> Self {
        Self {
            id: value.id,
            name: value.function.name,
            arguments: value.function.arguments,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum OpenAiApiTool {
    Function { function: OpenAiApiFunction },
}

#[derive(Debug, Serialize)]
pub(crate) struct OpenAiApiFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl TryFrom<ToolDefinition> for OpenAiApiTool {
    type Error = ProviderError;

    fn try_from(value: ToolDefinition) -> Result<Self, Self::Error> {
        let parameters = serde_json::from_str::<Value>(&value.input_schema).map_err(|_| {
            ProviderError::invalid_request(format!(
                "OpenAI tool '{}' schema must be valid JSON",
                value.name
            ))
        })?;

        Ok(Self::Function {
            function: OpenAiApiFunction {
                name: value.name,
                description: value.description,
                parameters,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiResponse {
    pub model: String,
    pub choices: Vec<OpenAiApiChoice>,
    pub usage: Option<OpenAiApiUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiChoice {
    pub message: OpenAiApiReply,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiReply {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<OpenAiApiToolCall>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl From<OpenAiApiUsage> for TokenUsage {
    fn from(value: OpenAiApiUsage) -> Self {
        Self {
            input_tokens: value.prompt_tokens,
            output_tokens: value.completion_tokens,
            total_tokens: value.total_tokens,
        }
    }
}

impl TryFrom<OpenAiApiResponse> for OpenAiResponse {
    type Error = ProviderError;

    fn try_from(value: OpenAiApiResponse) -> Result<Self, Self::Error> {
        let Some(choice) = value.choices.into_iter().next() else {
            return Err(ProviderError::transport(
                "OpenAI response did not include choices",
            ));
        };

        Ok(Self {
            model: value.model,
            content: choice.message.content.unwrap_or_default(),
            tool_calls: choice
                .message
                .tool_calls
                .unwrap_or_default()
                .into_iter()
                .map(ToolCall::from)
                .collect(),
            finish_reason: parse_finish_reason(choice.finish_reason.as_deref()),
            usage: value.usage.map(TokenUsage::from).unwrap_or_default(),
        })
    }
}
