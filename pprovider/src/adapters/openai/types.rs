//! Chat Completions request and response values, before and after the wire
//! format.

use std::fmt::Formatter;

use crate::{
    Message, ModelResponse, OutputItem, ProviderError, ProviderId, Role, SecretString,
    StopReason, TokenUsage, ToolCall, ToolDefinition,
};

#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiRequest {
    pub model: String,
    pub messages: Vec<OpenAiMessage>,
    pub tools: Vec<ToolDefinition>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// A chat message in the role-specific shape Chat Completions expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenAiMessage {
    System(String),
    User(String),
    Assistant {
        content: String,
        tool_calls: Vec<ToolCall>,
    },
    Tool {
        tool_call_id: String,
        content: String,
    },
}

impl OpenAiMessage {
    pub fn role(&self) -> &'static str {
        match self {
            Self::System(_) => "system",
            Self::User(_) => "user",
            Self::Assistant { .. } => "assistant",
            Self::Tool { .. } => "tool",
        }
    }
}

impl TryFrom<Message> for OpenAiMessage {
    type Error = ProviderError;

    fn try_from(value: Message) -> Result<Self, Self::Error> {
        Ok(match value.role {
            Role::System => Self::System(value.content),
            Role::User => Self::User(value.content),
            Role::Assistant => Self::Assistant {
                content: value.content,
                tool_calls: value.tool_calls,
            },
            Role::Tool => Self::Tool {
                tool_call_id: value.tool_call_id.ok_or_else(|| {
                    ProviderError::invalid_request("OpenAI tool message requires a tool_call_id")
                })?,
                content: value.content,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiResponse {
    pub model: String,
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    pub finish_reason: OpenAiFinishReason,
    pub usage: TokenUsage,
}

impl OpenAiResponse {
    pub(crate) fn into_model_response(self) -> ModelResponse {
        let text = (!self.content.is_empty())
            .then(|| OutputItem::Message(Message::new(Role::Assistant, self.content)));

        let output = text
            .into_iter()
            .chain(self.tool_calls.into_iter().map(OutputItem::ToolCall))
            .collect();

        ModelResponse {
            provider: ProviderId::OpenAi,
            model: self.model,
            output,
            stop_reason: self.finish_reason.into(),
            usage: self.usage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiFinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    Other,
}

impl From<OpenAiFinishReason> for StopReason {
    fn from(value: OpenAiFinishReason) -> Self {
        match value {
            OpenAiFinishReason::Stop => Self::EndTurn,
            OpenAiFinishReason::Length => Self::MaxTokens,
            OpenAiFinishReason::ToolCalls => Self::ToolUse,
            OpenAiFinishReason::ContentFilter => Self::Cancelled,
            OpenAiFinishReason::Other => Self::Other,
        }
    }
}

/// Bearer key sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiAuth(pub SecretString);

impl std::fmt::Debug for OpenAiAuth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("OpenAiAuth([REDACTED])")
    }
}
