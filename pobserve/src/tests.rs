use std::sync::{Arc, Mutex};
use std::time::Duration;

use pchat::{ChatBackend, ChatError, ChatFuture, ChatReply, ChatRequest};
use pdispatch::{DispatchError, DispatchHooks, PromptDispatcher};
use pprovider::{ProviderId, StopReason, TokenUsage, ToolCall};
use ptooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

use crate::{
    MetricsObservabilityHooks, ObservabilityHooks, SafeDispatchHooks, SafeToolHooks,
    TracingObservabilityHooks,
};

fn sample_tool_call() -> ToolCall {
    ToolCall {
        id: "call-1".to_string(),
        name: "utc_time".to_string(),
        arguments: "{}".to_string(),
    }
}

fn sample_tool_context() -> ToolExecutionContext {
    ToolExecutionContext::new("claude-haiku-4-5").with_round(1)
}

fn exercise_all_callbacks<H>(hooks: &H)
where
    H: DispatchHooks + ToolRuntimeHooks,
{
    let dispatch_error = DispatchError::configuration("OPENAI_API_KEY is not set");
    let tool_error = ToolError::execution("exit status 1");

    hooks.on_dispatch_start(ProviderId::OpenAi, "gpt-4o");
    hooks.on_dispatch_success(
        ProviderId::Anthropic,
        "claude-haiku-4-5",
        Duration::from_millis(40),
    );
    hooks.on_dispatch_failure(
        ProviderId::OpenAi,
        "gpt-4o",
        &dispatch_error,
        Duration::from_millis(1),
    );

    hooks.on_execution_start(&sample_tool_call(), &sample_tool_context());
    hooks.on_execution_success(
        &sample_tool_call(),
        &sample_tool_context(),
        &ToolExecutionResult::new("call-1", "2026-01-01T00:00:00Z"),
        Duration::from_millis(20),
    );
    hooks.on_execution_failure(
        &sample_tool_call(),
        &sample_tool_context(),
        &tool_error,
        Duration::from_millis(20),
    );
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    exercise_all_callbacks(&TracingObservabilityHooks);
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    exercise_all_callbacks(&MetricsObservabilityHooks);
}

#[test]
fn combined_hooks_smoke_test_all_callbacks() {
    exercise_all_callbacks(&ObservabilityHooks::default());
}

#[derive(Default, Clone)]
struct RecordingHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingHooks {
    fn push(&self, event: &'static str) {
        self.events.lock().expect("events lock").push(event);
    }
}

impl DispatchHooks for RecordingHooks {
    fn on_dispatch_start(&self, _provider: ProviderId, _model: &str) {
        self.push("dispatch_start");
    }

    fn on_dispatch_success(&self, _provider: ProviderId, _model: &str, _elapsed: Duration) {
        self.push("dispatch_success");
    }

    fn on_dispatch_failure(
        &self,
        _provider: ProviderId,
        _model: &str,
        _error: &DispatchError,
        _elapsed: Duration,
    ) {
        self.push("dispatch_failure");
    }
}

impl ToolRuntimeHooks for RecordingHooks {
    fn on_execution_start(&self, _tool_call: &ToolCall, _context: &ToolExecutionContext) {
        self.push("execution_start");
    }

    fn on_execution_success(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        _elapsed: Duration,
    ) {
        self.push("execution_success");
    }

    fn on_execution_failure(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
        self.push("execution_failure");
    }
}

struct PanickingHooks;

impl DispatchHooks for PanickingHooks {
    fn on_dispatch_start(&self, _provider: ProviderId, _model: &str) {
        panic!("dispatch start panic");
    }

    fn on_dispatch_success(&self, _provider: ProviderId, _model: &str, _elapsed: Duration) {
        panic!("dispatch success panic");
    }

    fn on_dispatch_failure(
        &self,
        _provider: ProviderId,
        _model: &str,
        _error: &DispatchError,
        _elapsed: Duration,
    ) {
        panic!("dispatch failure panic");
    }
}

impl ToolRuntimeHooks for PanickingHooks {
    fn on_execution_start(&self, _tool_call: &ToolCall, _context: &ToolExecutionContext) {
        panic!("start panic");
    }

    fn on_execution_success(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        _elapsed: Duration,
    ) {
        panic!("success panic");
    }

    fn on_execution_failure(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
        panic!("failure panic");
    }
}

#[test]
fn safe_wrappers_delegate_when_inner_succeeds() {
    let recording = RecordingHooks::default();
    exercise_all_callbacks(&SafeBoth::new(recording.clone()));

    assert_eq!(
        *recording.events.lock().expect("events lock"),
        vec![
            "dispatch_start",
            "dispatch_success",
            "dispatch_failure",
            "execution_start",
            "execution_success",
            "execution_failure",
        ]
    );
}

#[test]
fn safe_wrappers_swallow_panics() {
    exercise_all_callbacks(&SafeBoth::new(PanickingHooks));
}

/// Both safe wrappers over one inner hook value.
struct SafeBoth<H> {
    dispatch: SafeDispatchHooks<Arc<H>>,
    tool: SafeToolHooks<Arc<H>>,
}

impl<H> SafeBoth<H> {
    fn new(inner: H) -> Self {
        let inner = Arc::new(inner);
        Self {
            dispatch: SafeDispatchHooks::new(Arc::clone(&inner)),
            tool: SafeToolHooks::new(inner),
        }
    }
}

impl<H> DispatchHooks for SafeBoth<H>
where
    H: DispatchHooks,
{
    fn on_dispatch_start(&self, provider: ProviderId, model: &str) {
        self.dispatch.on_dispatch_start(provider, model);
    }

    fn on_dispatch_success(&self, provider: ProviderId, model: &str, elapsed: Duration) {
        self.dispatch.on_dispatch_success(provider, model, elapsed);
    }

    fn on_dispatch_failure(
        &self,
        provider: ProviderId,
        model: &str,
        error: &DispatchError,
        elapsed: Duration,
    ) {
        self.dispatch
            .on_dispatch_failure(provider, model, error, elapsed);
    }
}

impl<H> ToolRuntimeHooks for SafeBoth<H>
where
    H: ToolRuntimeHooks,
{
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        self.tool.on_execution_start(tool_call, context);
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        self.tool
            .on_execution_success(tool_call, context, result, elapsed);
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        self.tool
            .on_execution_failure(tool_call, context, error, elapsed);
    }
}

struct OkBackend;

impl ChatBackend for OkBackend {
    fn call<'a>(&'a self, request: ChatRequest) -> ChatFuture<'a, Result<ChatReply, ChatError>> {
        Box::pin(async move {
            Ok(ChatReply {
                model: request.options.model_id,
                text: "fine".to_string(),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
                tool_rounds: 0,
            })
        })
    }
}

#[tokio::test]
async fn panicking_dispatch_hooks_do_not_break_dispatch() {
    let dispatcher = PromptDispatcher::builder(Arc::new(OkBackend))
        .hooks(Arc::new(SafeDispatchHooks::new(PanickingHooks)))
        .build();

    let response = dispatcher
        .dispatch("still works?", None)
        .await
        .expect("dispatch should succeed despite hook panics");
    assert_eq!(response.text, "fine");
}
