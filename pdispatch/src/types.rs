//! Dispatch request, plan and response values.

use pchat::RequestOptions;
use pprovider::{ProviderId, StopReason, TokenUsage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub text: String,
    pub model_override: Option<String>,
}

impl PromptRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_override: None,
        }
    }

    pub fn with_model_override(mut self, model: impl Into<String>) -> Self {
        self.model_override = Some(model.into());
        self
    }
}

/// Which provider a request goes to and with what options.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchPlan {
    pub provider: ProviderId,
    pub options: RequestOptions,
}

impl DispatchPlan {
    pub fn model_id(&self) -> &str {
        &self.options.model_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub provider: ProviderId,
    pub model: String,
    pub text: String,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
}
