//! Tracing and metrics hooks behind one value.

use std::time::Duration;

use pdispatch::{DispatchError, DispatchHooks};
use pprovider::{ProviderId, ToolCall};
use ptooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

use crate::{MetricsObservabilityHooks, TracingObservabilityHooks};

/// Emits every event to both [`TracingObservabilityHooks`] and
/// [`MetricsObservabilityHooks`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ObservabilityHooks {
    tracing: TracingObservabilityHooks,
    metrics: MetricsObservabilityHooks,
}

impl DispatchHooks for ObservabilityHooks {
    fn on_dispatch_start(&self, provider: ProviderId, model: &str) {
        self.tracing.on_dispatch_start(provider, model);
        self.metrics.on_dispatch_start(provider, model);
    }

    fn on_dispatch_success(&self, provider: ProviderId, model: &str, elapsed: Duration) {
        self.tracing.on_dispatch_success(provider, model, elapsed);
        self.metrics.on_dispatch_success(provider, model, elapsed);
    }

    fn on_dispatch_failure(
        &self,
        provider: ProviderId,
        model: &str,
        error: &DispatchError,
        elapsed: Duration,
    ) {
        self.tracing
            .on_dispatch_failure(provider, model, error, elapsed);
        self.metrics
            .on_dispatch_failure(provider, model, error, elapsed);
    }
}

impl ToolRuntimeHooks for ObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        self.tracing.on_execution_start(tool_call, context);
        self.metrics.on_execution_start(tool_call, context);
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        self.tracing
            .on_execution_success(tool_call, context, result, elapsed);
        self.metrics
            .on_execution_success(tool_call, context, result, elapsed);
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        self.tracing
            .on_execution_failure(tool_call, context, error, elapsed);
        self.metrics
            .on_execution_failure(tool_call, context, error, elapsed);
    }
}
