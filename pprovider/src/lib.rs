//! Provider abstractions and HTTP adapters for chat-completion backends.
//!
//! Each adapter turns a provider-agnostic [`ModelRequest`] into one call
//! against a vendor API and maps the answer back into a [`ModelResponse`].

mod credentials;
mod error;
mod model;
mod provider;

pub mod adapters;
pub mod prelude;

pub use credentials::{SecretString, SecureCredentialManager};
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    Message, ModelRequest, ModelRequestBuilder, ModelResponse, OutputItem, ProviderId, Role,
    StopReason, TokenUsage, ToolCall, ToolDefinition, ToolResult,
};
pub use pcommon::GenerationOptions;
pub use provider::{ModelProvider, ProviderFuture};
