//! Request and reply values exchanged with a [`crate::ChatBackend`].
//!
//! ```rust
//! use pchat::{ChatRequest, RequestOptions};
//!
//! let request = ChatRequest::new("hello", RequestOptions::new("gpt-4o").with_temperature(1.0));
//! assert_eq!(request.options.model_id, "gpt-4o");
//! assert_eq!(request.options.temperature, Some(1.0));
//! assert!(request.tools.is_empty());
//! ```

use std::sync::Arc;

use pprovider::{StopReason, TokenUsage};
use ptooling::Tool;

/// Provider-specific options for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub model_id: String,
    pub temperature: Option<f32>,
}

impl RequestOptions {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[derive(Clone)]
pub struct ChatRequest {
    pub prompt: String,
    pub options: RequestOptions,
    pub tools: Vec<Arc<dyn Tool>>,
}

impl ChatRequest {
    pub fn new(prompt: impl Into<String>, options: RequestOptions) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            tools: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools = tools;
        self
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools
            .iter()
            .map(|tool| tool.definition().name)
            .collect()
    }
}

impl std::fmt::Debug for ChatRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatRequest")
            .field("prompt", &self.prompt)
            .field("options", &self.options)
            .field("tools", &self.tool_names())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// Model id reported by the provider, which may be more specific than the one requested.
    pub model: String,
    pub text: String,
    pub stop_reason: StopReason,
    /// Summed across every provider round trip of the call.
    pub usage: TokenUsage,
    pub tool_rounds: usize,
}
