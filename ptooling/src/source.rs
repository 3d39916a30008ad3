//! Read-only view over a set of tools that can be attached to a request.

use std::sync::Arc;

use pprovider::ToolDefinition;

use crate::{Tool, ToolRegistry};

/// Supplies the tool callbacks the model may call, in registration order.
pub trait ToolCallbackSource: Send + Sync {
    fn tool_callbacks(&self) -> Vec<Arc<dyn Tool>>;

    fn definitions(&self) -> Vec<ToolDefinition> {
        self.tool_callbacks()
            .iter()
            .map(|tool| tool.definition())
            .collect()
    }
}

impl ToolCallbackSource for ToolRegistry {
    fn tool_callbacks(&self) -> Vec<Arc<dyn Tool>> {
        self.tools()
    }

    fn definitions(&self) -> Vec<ToolDefinition> {
        ToolRegistry::definitions(self)
    }
}
