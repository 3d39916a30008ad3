//! What a tool sees about the call it is answering, and what it returns.

use pprovider::{ToolCall, ToolResult};

/// Per-call context handed to a tool.
///
/// `round` counts tool rounds within one dispatch, starting at 1; a context
/// built outside the tool loop reports 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionContext {
    pub model: String,
    pub round: usize,
}

impl ToolExecutionContext {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            round: 0,
        }
    }

    pub fn with_round(mut self, round: usize) -> Self {
        self.round = round;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionResult {
    pub tool_call_id: String,
    pub output: String,
}

impl ToolExecutionResult {
    pub fn new(tool_call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            output: output.into(),
        }
    }

    pub fn from_call(call: &ToolCall, output: impl Into<String>) -> Self {
        Self::new(call.id.clone(), output)
    }

    pub fn into_tool_result(self) -> ToolResult {
        ToolResult {
            tool_call_id: self.tool_call_id,
            output: self.output,
        }
    }
}
