//! Anthropic provider implementation over the native Messages API.

use std::sync::Arc;

use reqwest::Client;

use crate::{
    ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId,
    SecureCredentialManager,
};

use super::auth::resolve_anthropic_auth;
use super::transport::{AnthropicHttpTransport, AnthropicTransport};
use super::types::{AnthropicRequest, AnthropicTool, fold_messages};

/// Used when the request leaves `max_tokens` unset; the API requires it.
pub const DEFAULT_ANTHROPIC_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn AnthropicTransport>,
    default_max_tokens: u32,
}

impl AnthropicProvider {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn AnthropicTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
            default_max_tokens: DEFAULT_ANTHROPIC_MAX_TOKENS,
        }
    }

    pub fn with_default_max_tokens(mut self, max_tokens: u32) -> Self {
        self.default_max_tokens = max_tokens;
        self
    }

    pub fn default_http_transport(client: Client) -> AnthropicHttpTransport {
        AnthropicHttpTransport::new(client)
    }

    pub(crate) fn build_anthropic_request(&self, request: ModelRequest) -> AnthropicRequest {
        let (system, messages) = fold_messages(request.messages);
        let tools = request
            .tools
            .into_iter()
            .map(AnthropicTool::from)
            .collect::<Vec<_>>();

        AnthropicRequest {
            model: request.model,
            system,
            messages,
            tools,
            temperature: request.options.temperature,
            max_tokens: request.options.max_tokens.unwrap_or(self.default_max_tokens),
        }
    }
}

impl ModelProvider for AnthropicProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = resolve_anthropic_auth(&self.credentials)?;
            let anthropic_request = self.build_anthropic_request(request);
            let response = self.transport.complete(anthropic_request, auth).await?;
            Ok(response.into_model_response())
        })
    }
}
