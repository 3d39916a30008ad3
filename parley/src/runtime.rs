//! Process-start wiring: providers, chat clients, tools and hooks in one
//! [`PromptDispatcher`].

use std::sync::Arc;

use pobserve::{ObservabilityHooks, SafeDispatchHooks, SafeToolHooks};

use crate::config::{Settings, ToolsFile};
use crate::providers::{ProviderBuildConfig, build_provider_with_config};
use crate::{
    ChatClient, ConfigError, ModelProvider, PromptDispatcher, ProviderId, ToolRegistry,
    ToolRuntimeHooks,
};

/// Loads the configured tools file; `None` when no file is configured.
pub fn load_tools(settings: &Settings) -> Result<Option<Arc<ToolRegistry>>, ConfigError> {
    let Some(path) = settings.tools_file.as_deref() else {
        return Ok(None);
    };

    let registry = ToolsFile::load(path)?.into_registry()?;
    tracing::debug!(path = %path.display(), tools = registry.len(), "loaded tools file");
    Ok(Some(Arc::new(registry)))
}

pub fn chat_client(
    provider: Arc<dyn ModelProvider>,
    settings: &Settings,
    tool_hooks: Arc<dyn ToolRuntimeHooks>,
) -> ChatClient {
    ChatClient::builder(provider)
        .max_tool_rounds(settings.max_tool_rounds)
        .tool_timeout(settings.tool_timeout)
        .tool_hooks(tool_hooks)
        .build()
}

/// Builds the HTTP providers from `settings` and wires them up.
///
/// The OpenAI backend exists only when an OpenAI key is configured.
pub fn build_dispatcher(settings: &Settings) -> Result<PromptDispatcher, ConfigError> {
    let mut anthropic = ProviderBuildConfig::new(ProviderId::Anthropic);
    anthropic.api_key = settings.anthropic_api_key.clone();
    anthropic.base_url = settings.anthropic_base_url.clone();
    anthropic.timeout = settings.http_timeout;
    anthropic.max_tokens = settings.anthropic_max_tokens;
    let anthropic = build_provider_with_config(anthropic)?;

    let openai = match &settings.openai_api_key {
        Some(api_key) => {
            let mut openai = ProviderBuildConfig::new(ProviderId::OpenAi);
            openai.api_key = Some(api_key.clone());
            openai.base_url = settings.openai_base_url.clone();
            openai.timeout = settings.http_timeout;
            Some(build_provider_with_config(openai)?)
        }
        None => None,
    };

    build_dispatcher_with(anthropic, openai, settings)
}

/// Wires already-built providers; the HTTP-free half of [`build_dispatcher`].
pub fn build_dispatcher_with(
    anthropic: Arc<dyn ModelProvider>,
    openai: Option<Arc<dyn ModelProvider>>,
    settings: &Settings,
) -> Result<PromptDispatcher, ConfigError> {
    let hooks = ObservabilityHooks::default();
    let tool_hooks: Arc<dyn ToolRuntimeHooks> = Arc::new(SafeToolHooks::new(hooks));

    let mut builder = PromptDispatcher::builder(Arc::new(chat_client(
        anthropic,
        settings,
        Arc::clone(&tool_hooks),
    )))
    .hooks(Arc::new(SafeDispatchHooks::new(hooks)));

    if let Some(openai) = openai {
        builder = builder.openai(Arc::new(chat_client(openai, settings, tool_hooks)));
    }

    if let Some(tools) = load_tools(settings)? {
        builder = builder.tools(tools);
    }

    let dispatcher = builder.build();
    tracing::debug!(
        openai = dispatcher.has_openai(),
        tools = dispatcher.list_tools().len(),
        "dispatcher ready"
    );
    Ok(dispatcher)
}
