//! Prompt dispatch: pick a provider from the model name, check it is
//! configured, assemble its request options and make one call.
//!
//! ```rust
//! use pdispatch::{DEFAULT_MODEL, classify_model};
//! use pprovider::ProviderId;
//!
//! assert_eq!(classify_model(Some("gpt-4o")), ProviderId::OpenAi);
//! assert_eq!(classify_model(Some("o3-mini")), ProviderId::OpenAi);
//! assert_eq!(classify_model(None), ProviderId::Anthropic);
//! assert_eq!(DEFAULT_MODEL, "claude-haiku-4-5");
//! ```

mod classify;
mod dispatcher;
mod error;
mod hooks;
mod listing;
mod types;

pub mod prelude {
    pub use crate::{
        ChatResponse, DispatchError, DispatchErrorKind, DispatchHooks, DispatchPlan,
        PromptDispatcher, PromptDispatcherBuilder, PromptRequest,
    };
    pub use pchat::{ChatBackend, RequestOptions};
    pub use ptooling::ToolCallbackSource;
}

pub use classify::{
    DEFAULT_MODEL, OPENAI_TEMPERATURE, classify_model, request_options, resolve_model_id,
};
pub use dispatcher::{PromptDispatcher, PromptDispatcherBuilder};
pub use error::{DispatchError, DispatchErrorKind};
pub use hooks::{DispatchHooks, NoopDispatchHooks};
pub use listing::{NO_TOOLS_LINE, TOOL_LISTING_HEADER, render_tool_listing};
pub use types::{ChatResponse, DispatchPlan, PromptRequest};
