//! Tracing-based hooks for dispatch and tool runtime events.
//!
//! ```rust
//! use pdispatch::DispatchHooks;
//! use pobserve::TracingObservabilityHooks;
//!
//! fn accepts_dispatch_hooks(_hooks: &dyn DispatchHooks) {}
//!
//! accepts_dispatch_hooks(&TracingObservabilityHooks);
//! ```

use std::time::Duration;

use pdispatch::{DispatchError, DispatchHooks};
use pprovider::{ProviderId, ToolCall};
use ptooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl DispatchHooks for TracingObservabilityHooks {
    fn on_dispatch_start(&self, provider: ProviderId, model: &str) {
        tracing::info!(
            phase = "dispatch",
            event = "start",
            provider = %provider,
            model
        );
    }

    fn on_dispatch_success(&self, provider: ProviderId, model: &str, elapsed: Duration) {
        tracing::info!(
            phase = "dispatch",
            event = "success",
            provider = %provider,
            model,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_dispatch_failure(
        &self,
        provider: ProviderId,
        model: &str,
        error: &DispatchError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "dispatch",
            event = "failure",
            provider = %provider,
            model,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }
}

impl ToolRuntimeHooks for TracingObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        tracing::info!(
            phase = "tool",
            event = "execution_start",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            model = context.model,
            round = context.round
        );
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "tool",
            event = "execution_success",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            model = context.model,
            round = context.round,
            output_bytes = result.output.len(),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        tracing::warn!(
            phase = "tool",
            event = "execution_failure",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            model = context.model,
            round = context.round,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }
}
