//! Chat Completions transport seam and its reqwest implementation.

use reqwest::Client;

use crate::adapters::status::{error_for_send, error_for_status};
use crate::{ProviderError, ProviderFuture};

use super::serde_api::{OpenAiApiResponse, build_api_request};
use super::types::{OpenAiAuth, OpenAiRequest, OpenAiResponse};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub trait OpenAiTransport: Send + Sync + std::fmt::Debug {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct OpenAiHttpTransport {
    client: Client,
    base_url: String,
}

impl OpenAiHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl OpenAiTransport for OpenAiHttpTransport {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async move {
            let body = build_api_request(request)?;
            let url = self.completions_url();
            tracing::debug!(
                provider = "openai",
                url = %url,
                model = %body.model,
                messages = body.messages.len(),
                tools = body.tools.len(),
                "sending chat completion request"
            );

            let response = self
                .client
                .post(url)
                .bearer_auth(auth.0.expose())
                .json(&body)
                .send()
                .await
                .map_err(error_for_send)?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(error_for_status("OpenAI", status, &text));
            }

            let parsed = response
                .json::<OpenAiApiResponse>()
                .await
                .map_err(|err| ProviderError::transport(err.to_string()))?;
            tracing::debug!(provider = "openai", model = %parsed.model, "chat completion received");

            OpenAiResponse::try_from(parsed)
        })
    }
}
