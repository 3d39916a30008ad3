//! `ModelProvider` over the Chat Completions API.

use std::sync::Arc;

use reqwest::Client;

use crate::{
    ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId,
    SecureCredentialManager,
};

use super::auth::resolve_openai_auth;
use super::transport::{OpenAiHttpTransport, OpenAiTransport};
use super::types::{OpenAiMessage, OpenAiRequest};

#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn OpenAiTransport>,
}

impl OpenAiProvider {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn OpenAiTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    pub fn default_http_transport(client: Client) -> OpenAiHttpTransport {
        OpenAiHttpTransport::new(client)
    }

    pub(crate) fn to_openai_request(
        &self,
        request: ModelRequest,
    ) -> Result<OpenAiRequest, ProviderError> {
        let messages = request
            .messages
            .into_iter()
            .map(OpenAiMessage::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OpenAiRequest {
            model: request.model,
            messages,
            tools: request.tools,
            temperature: request.options.temperature,
            max_tokens: request.options.max_tokens,
        })
    }
}

impl ModelProvider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = resolve_openai_auth(&self.credentials)?;
            let openai_request = self.to_openai_request(request)?;
            self.transport
                .complete(openai_request, auth)
                .await
                .map(|response| response.into_model_response())
        })
    }
}
