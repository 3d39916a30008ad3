//! Common `pprovider` imports for downstream crates.

pub use crate::{
    Message, ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse, OutputItem,
    ProviderError, ProviderErrorKind, ProviderFuture, ProviderId, Role, SecureCredentialManager,
    StopReason, TokenUsage, ToolCall, ToolDefinition, ToolResult,
};
pub use pcommon::BoxFuture;
