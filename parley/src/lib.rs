//! Facade over the parley workspace crates and the pieces of the `parley`
//! binary: configuration, provider construction, wiring and the terminal
//! front end.
//!
//! ```rust
//! use parley::{DEFAULT_MODEL, ProviderId, classify_model};
//!
//! assert_eq!(classify_model(Some("gpt-4o-mini")), ProviderId::OpenAi);
//! assert_eq!(classify_model(Some("claude-sonnet-4-5")), ProviderId::Anthropic);
//! assert_eq!(DEFAULT_MODEL, "claude-haiku-4-5");
//! ```

mod error;

pub mod cli;
pub mod config;
pub mod providers;
pub mod runtime;

pub mod prelude {
    pub use crate::config::{Cli, Mode, Settings, ToolsFile};
    pub use crate::runtime::{build_dispatcher, build_dispatcher_with};
    pub use crate::{
        ChatBackend, ChatClient, ChatResponse, ConfigError, DispatchError, PromptDispatcher,
        PromptRequest, ToolRegistry,
    };
}

pub use pchat;
pub use pcommon;
pub use pdispatch;
pub use pobserve;
pub use pprovider;
pub use ptooling;

pub use error::{ConfigError, ConfigErrorKind};

pub use pchat::{
    ChatBackend, ChatClient, ChatClientBuilder, ChatError, ChatErrorKind, ChatPolicy, ChatReply,
    ChatRequest, RequestOptions,
};
pub use pcommon::BoxFuture;
pub use pdispatch::{
    ChatResponse, DEFAULT_MODEL, DispatchError, DispatchErrorKind, DispatchHooks, DispatchPlan,
    PromptDispatcher, PromptDispatcherBuilder, PromptRequest, classify_model, render_tool_listing,
};
pub use pobserve::{ObservabilityHooks, SafeDispatchHooks, SafeToolHooks};
pub use pprovider::{
    Message, ModelProvider, ModelRequest, ModelResponse, OutputItem, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderId, Role, SecretString, SecureCredentialManager,
    StopReason, TokenUsage, ToolCall, ToolDefinition,
};
pub use ptooling::{
    CommandTool, FunctionTool, Tool, ToolCallbackSource, ToolError, ToolErrorKind, ToolRegistry,
    ToolRuntimeHooks,
};
