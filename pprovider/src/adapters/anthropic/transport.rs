//! Anthropic transport trait and reqwest-based HTTP implementation.

use reqwest::Client;

use crate::adapters::status::{error_for_send, error_for_status};
use crate::{ProviderError, ProviderFuture};

use super::serde_api::{AnthropicApiResponse, build_api_request};
use super::types::{AnthropicAuth, AnthropicRequest, AnthropicResponse};

pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

pub trait AnthropicTransport: Send + Sync + std::fmt::Debug {
    fn complete<'a>(
        &'a self,
        request: AnthropicRequest,
        auth: AnthropicAuth,
    ) -> ProviderFuture<'a, Result<AnthropicResponse, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct AnthropicHttpTransport {
    client: Client,
    base_url: String,
}

impl AnthropicHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: ANTHROPIC_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl AnthropicTransport for AnthropicHttpTransport {
    fn complete<'a>(
        &'a self,
        request: AnthropicRequest,
        auth: AnthropicAuth,
    ) -> ProviderFuture<'a, Result<AnthropicResponse, ProviderError>> {
        Box::pin(async move {
            let api_request = build_api_request(request)?;
            let url = self.endpoint("messages");
            tracing::debug!(
                provider = "anthropic",
                url = %url,
                model = %api_request.model,
                messages = api_request.messages.len(),
                "sending messages request"
            );

            let response = self
                .client
                .post(url)
                .header("x-api-key", auth.0.expose())
                .header("anthropic-version", ANTHROPIC_API_VERSION)
                .json(&api_request)
                .send()
                .await
                .map_err(error_for_send)?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(error_for_status("Anthropic", status, &body));
            }

            let parsed: AnthropicApiResponse = response
                .json()
                .await
                .map_err(|err| ProviderError::transport(err.to_string()))?;

            Ok(AnthropicResponse::from(parsed))
        })
    }
}
