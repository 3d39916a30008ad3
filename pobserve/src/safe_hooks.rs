//! Wrappers that keep a panicking hook from breaking the operation it observes.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use pdispatch::{DispatchError, DispatchHooks};
use pprovider::{ProviderId, ToolCall};
use ptooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

pub struct SafeDispatchHooks<H> {
    inner: H,
}

impl<H> SafeDispatchHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> DispatchHooks for SafeDispatchHooks<H>
where
    H: DispatchHooks,
{
    fn on_dispatch_start(&self, provider: ProviderId, model: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_dispatch_start(provider, model)
        }));
    }

    fn on_dispatch_success(&self, provider: ProviderId, model: &str, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_dispatch_success(provider, model, elapsed)
        }));
    }

    fn on_dispatch_failure(
        &self,
        provider: ProviderId,
        model: &str,
        error: &DispatchError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_dispatch_failure(provider, model, error, elapsed)
        }));
    }
}

pub struct SafeToolHooks<H> {
    inner: H,
}

impl<H> SafeToolHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ToolRuntimeHooks for SafeToolHooks<H>
where
    H: ToolRuntimeHooks,
{
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_execution_start(tool_call, context)
        }));
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_success(tool_call, context, result, elapsed)
        }));
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_failure(tool_call, context, error, elapsed)
        }));
    }
}
