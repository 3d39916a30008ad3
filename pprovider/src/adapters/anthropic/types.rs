//! Anthropic adapter types and provider-agnostic conversion logic.

use std::fmt::Formatter;

use crate::{
    Message, ModelResponse, OutputItem, ProviderId, Role, SecretString, StopReason, TokenUsage,
    ToolCall, ToolDefinition,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AnthropicRequest {
    pub model: String,
    pub system: Option<String>,
    pub messages: Vec<AnthropicMessage>,
    pub tools: Vec<AnthropicTool>,
    pub temperature: Option<f32>,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnthropicRole {
    User,
    Assistant,
}

impl AnthropicRole {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnthropicMessage {
    pub role: AnthropicRole,
    pub content: Vec<AnthropicContent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnthropicContent {
    Text(String),
    ToolUse(ToolCall),
    ToolResult {
        tool_use_id: String,
        content: String,
    },
}

/// Folds provider-agnostic messages into the Messages API shape.
///
/// System messages move to the top-level system prompt. Tool results become
/// `tool_result` blocks in a user turn, and consecutive results share one
/// turn so roles keep alternating. Whitespace-only assistant text before a
/// tool call is dropped; the Messages API rejects blank text blocks.
pub(crate) fn fold_messages(messages: Vec<Message>) -> (Option<String>, Vec<AnthropicMessage>) {
    let mut system = Vec::new();
    let mut folded: Vec<AnthropicMessage> = Vec::new();

    for message in messages {
        match message.role {
            Role::System => system.push(message.content),
            Role::User => folded.push(AnthropicMessage {
                role: AnthropicRole::User,
                content: vec![AnthropicContent::Text(message.content)],
            }),
            Role::Assistant => {
                let mut content = Vec::new();
                if !message.content.trim().is_empty() {
                    content.push(AnthropicContent::Text(message.content));
                }
                content.extend(message.tool_calls.into_iter().map(AnthropicContent::ToolUse));
                folded.push(AnthropicMessage {
                    role: AnthropicRole::Assistant,
                    content,
                });
            }
            Role::Tool => {
                let block = AnthropicContent::ToolResult {
                    tool_use_id: message.tool_call_id.unwrap_or_default(),
                    content: message.content,
                };

                match folded.last_mut() {
                    Some(last)
                        if last.role == AnthropicRole::User
                            && last
                                .content
                                .iter()
                                .all(|item| matches!(item, AnthropicContent::ToolResult { .. })) =>
                    {
                        last.content.push(block);
                    }
                    _ => folded.push(AnthropicMessage {
                        role: AnthropicRole::User,
                        content: vec![block],
                    }),
                }
            }
        }
    }

    let system = (!system.is_empty()).then(|| system.join("\n\n"));
    (system, folded)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnthropicTool {
    pub name: String,
    pub description: String,
    pub input_schema: String,
}

impl From<ToolDefinition> for AnthropicTool {
    fn from(value: ToolDefinition) -> Self {
        Self {
            name: value.name,
            description: value.description,
            input_schema: value.input_schema,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnthropicResponse {
    pub model: String,
    pub content: Vec<AnthropicContent>,
    pub stop_reason: AnthropicStopReason,
    pub usage: AnthropicUsage,
}

impl AnthropicResponse {
    pub(crate) fn into_model_response(self) -> ModelResponse {
        let output = self
            .content
            .into_iter()
            .filter_map(|block| match block {
                AnthropicContent::Text(text) if !text.is_empty() => {
                    Some(OutputItem::Message(Message::new(Role::Assistant, text)))
                }
                AnthropicContent::ToolUse(call) => Some(OutputItem::ToolCall(call)),
                _ => None,
            })
            .collect();

        ModelResponse {
            provider: ProviderId::Anthropic,
            model: self.model,
            output,
            stop_reason: self.stop_reason.into(),
            usage: self.usage.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnthropicStopReason {
    EndTurn,
    StopSequence,
    MaxTokens,
    ToolUse,
    Refusal,
    Other,
}

impl From<AnthropicStopReason> for StopReason {
    fn from(value: AnthropicStopReason) -> Self {
        match value {
            AnthropicStopReason::EndTurn | AnthropicStopReason::StopSequence => Self::EndTurn,
            AnthropicStopReason::MaxTokens => Self::MaxTokens,
            AnthropicStopReason::ToolUse => Self::ToolUse,
            AnthropicStopReason::Refusal => Self::Cancelled,
            AnthropicStopReason::Other => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnthropicUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl From<AnthropicUsage> for TokenUsage {
    fn from(value: AnthropicUsage) -> Self {
        Self {
            input_tokens: value.input_tokens,
            output_tokens: value.output_tokens,
            total_tokens: value.input_tokens.saturating_add(value.output_tokens),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct AnthropicAuth(pub SecretString);

impl std::fmt::Debug for AnthropicAuth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("AnthropicAuth([REDACTED])")
    }
}
