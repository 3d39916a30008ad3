//! The prompt dispatcher: provider selection, option assembly and one call.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

use pchat::{ChatBackend, ChatRequest};
use pprovider::{ProviderId, ToolDefinition};
use ptooling::ToolCallbackSource;

use crate::{
    ChatResponse, DispatchError, DispatchHooks, DispatchPlan, NoopDispatchHooks, PromptRequest,
    classify_model, render_tool_listing, request_options, resolve_model_id,
};

pub struct PromptDispatcherBuilder {
    anthropic: Arc<dyn ChatBackend>,
    openai: Option<Arc<dyn ChatBackend>>,
    tools: Option<Arc<dyn ToolCallbackSource>>,
    hooks: Arc<dyn DispatchHooks>,
}

impl PromptDispatcherBuilder {
    pub fn new(anthropic: Arc<dyn ChatBackend>) -> Self {
        Self {
            anthropic,
            openai: None,
            tools: None,
            hooks: Arc::new(NoopDispatchHooks),
        }
    }

    pub fn openai(mut self, openai: Arc<dyn ChatBackend>) -> Self {
        self.openai = Some(openai);
        self
    }

    pub fn tools(mut self, tools: Arc<dyn ToolCallbackSource>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn DispatchHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> PromptDispatcher {
        PromptDispatcher {
            anthropic: self.anthropic,
            openai: self.openai,
            tools: self.tools,
            hooks: self.hooks,
        }
    }
}

/// Routes each prompt to exactly one backend.
///
/// The Anthropic backend is always present; the OpenAI backend and the tool
/// source are optional.
#[derive(Clone)]
pub struct PromptDispatcher {
    anthropic: Arc<dyn ChatBackend>,
    openai: Option<Arc<dyn ChatBackend>>,
    tools: Option<Arc<dyn ToolCallbackSource>>,
    hooks: Arc<dyn DispatchHooks>,
}

impl PromptDispatcher {
    pub fn new(
        anthropic: Arc<dyn ChatBackend>,
        openai: Option<Arc<dyn ChatBackend>>,
        tools: Option<Arc<dyn ToolCallbackSource>>,
    ) -> Self {
        let mut builder = Self::builder(anthropic);
        if let Some(openai) = openai {
            builder = builder.openai(openai);
        }
        if let Some(tools) = tools {
            builder = builder.tools(tools);
        }
        builder.build()
    }

    pub fn builder(anthropic: Arc<dyn ChatBackend>) -> PromptDispatcherBuilder {
        PromptDispatcherBuilder::new(anthropic)
    }

    pub fn has_openai(&self) -> bool {
        self.openai.is_some()
    }

    /// Tools in registration order; empty when no tool source is configured.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.tools
            .as_ref()
            .map(|tools| tools.definitions())
            .unwrap_or_default()
    }

    pub fn print_tools<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(render_tool_listing(&self.list_tools()).as_bytes())?;
        writer.flush()
    }

    /// Classifies, checks availability and assembles options without I/O.
    pub fn plan(&self, request: &PromptRequest) -> Result<DispatchPlan, DispatchError> {
        self.route(request).map(|(plan, _)| plan)
    }

    fn route(
        &self,
        request: &PromptRequest,
    ) -> Result<(DispatchPlan, &Arc<dyn ChatBackend>), DispatchError> {
        if request.text.trim().is_empty() {
            return Err(DispatchError::invalid_request("prompt must not be empty"));
        }

        let model_override = request.model_override.as_deref();
        let provider = classify_model(model_override);
        let model_id = resolve_model_id(model_override);

        let backend = match provider {
            ProviderId::Anthropic => &self.anthropic,
            ProviderId::OpenAi => self.openai.as_ref().ok_or_else(|| {
                DispatchError::configuration(format!(
                    "OpenAI model '{model_id}' is not available; set OPENAI_API_KEY to enable the OpenAI backend"
                ))
            })?,
        };

        let plan = DispatchPlan {
            provider,
            options: request_options(provider, model_id),
        };
        Ok((plan, backend))
    }

    pub async fn dispatch(
        &self,
        prompt: impl Into<String>,
        model_override: Option<String>,
    ) -> Result<ChatResponse, DispatchError> {
        self.dispatch_request(PromptRequest {
            text: prompt.into(),
            model_override,
        })
        .await
    }

    pub async fn dispatch_request(
        &self,
        request: PromptRequest,
    ) -> Result<ChatResponse, DispatchError> {
        let model_override = request.model_override.as_deref();
        let provider = classify_model(model_override);
        let model = resolve_model_id(model_override);

        self.hooks.on_dispatch_start(provider, &model);
        let started = Instant::now();

        match self.execute(request).await {
            Ok(response) => {
                self.hooks
                    .on_dispatch_success(provider, &model, started.elapsed());
                Ok(response)
            }
            Err(error) => {
                self.hooks
                    .on_dispatch_failure(provider, &model, &error, started.elapsed());
                Err(error)
            }
        }
    }

    async fn execute(&self, request: PromptRequest) -> Result<ChatResponse, DispatchError> {
        let (plan, backend) = self.route(&request)?;

        let tools = self
            .tools
            .as_ref()
            .map(|tools| tools.tool_callbacks())
            .unwrap_or_default();

        let chat_request = ChatRequest::new(request.text, plan.options).with_tools(tools);
        let reply = backend.call(chat_request).await?;

        Ok(ChatResponse {
            provider: plan.provider,
            model: reply.model,
            text: reply.text,
            stop_reason: reply.stop_reason,
            usage: reply.usage,
        })
    }
}

impl std::fmt::Debug for PromptDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptDispatcher")
            .field("openai", &self.openai.is_some())
            .field("tools", &self.tools.is_some())
            .finish_non_exhaustive()
    }
}
