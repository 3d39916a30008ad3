mod auth;
mod provider;
mod serde_api;
mod tests;
mod transport;
mod types;

pub use provider::{AnthropicProvider, DEFAULT_ANTHROPIC_MAX_TOKENS};
pub use transport::{
    ANTHROPIC_API_VERSION, ANTHROPIC_BASE_URL, AnthropicHttpTransport, AnthropicTransport,
};
pub use types::{
    AnthropicAuth, AnthropicContent, AnthropicMessage, AnthropicRequest, AnthropicResponse,
    AnthropicRole, AnthropicStopReason, AnthropicTool, AnthropicUsage,
};
