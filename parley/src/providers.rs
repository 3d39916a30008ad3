//! Provider construction from resolved configuration.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::{ModelProvider, ProviderError, ProviderId, SecretString, SecureCredentialManager};

#[derive(Debug, Clone)]
pub struct ProviderBuildConfig {
    pub provider_id: ProviderId,
    pub api_key: Option<SecretString>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
    pub max_tokens: Option<u32>,
}

impl ProviderBuildConfig {
    pub fn new(provider_id: ProviderId) -> Self {
        Self {
            provider_id,
            api_key: None,
            base_url: None,
            timeout: None,
            max_tokens: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key));
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Only the Anthropic adapter uses this; its API requires a cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

pub fn http_client(timeout: Option<Duration>) -> Result<Client, ProviderError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))
}

/// Builds a provider over a fresh HTTP client.
///
/// An Anthropic provider may be built without a key; its calls then fail with
/// an authentication error. OpenAI always needs one.
pub fn build_provider_with_config(
    config: ProviderBuildConfig,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    if let Some(api_key) = &config.api_key
        && api_key.expose().trim().is_empty()
    {
        return Err(ProviderError::authentication(
            "provider API key must not be empty",
        ));
    }

    let credentials = Arc::new(SecureCredentialManager::new());
    let http = http_client(config.timeout)?;

    match config.provider_id {
        ProviderId::Anthropic => build_anthropic_provider(credentials, config, http),
        ProviderId::OpenAi => build_openai_provider(credentials, config, http),
    }
}

#[cfg(feature = "provider-openai")]
fn build_openai_provider(
    credentials: Arc<SecureCredentialManager>,
    config: ProviderBuildConfig,
    http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use pprovider::adapters::openai::OpenAiProvider;

    let api_key = config
        .api_key
        .ok_or_else(|| ProviderError::authentication("OpenAI provider requires an API key"))?;
    credentials.set_openai_api_key(api_key.expose())?;

    let mut transport = OpenAiProvider::default_http_transport(http);
    if let Some(base_url) = config.base_url {
        transport = transport.with_base_url(base_url);
    }

    Ok(Arc::new(OpenAiProvider::new(
        credentials,
        Arc::new(transport),
    )))
}

#[cfg(not(feature = "provider-openai"))]
fn build_openai_provider(
    _credentials: Arc<SecureCredentialManager>,
    _config: ProviderBuildConfig,
    _http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-openai feature is not enabled on parley",
    ))
}

#[cfg(feature = "provider-anthropic")]
fn build_anthropic_provider(
    credentials: Arc<SecureCredentialManager>,
    config: ProviderBuildConfig,
    http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use pprovider::adapters::anthropic::AnthropicProvider;

    if let Some(api_key) = &config.api_key {
        credentials.set_anthropic_api_key(api_key.expose())?;
    }

    let mut transport = AnthropicProvider::default_http_transport(http);
    if let Some(base_url) = config.base_url {
        transport = transport.with_base_url(base_url);
    }

    let mut provider = AnthropicProvider::new(credentials, Arc::new(transport));
    if let Some(max_tokens) = config.max_tokens {
        provider = provider.with_default_max_tokens(max_tokens);
    }

    Ok(Arc::new(provider))
}

#[cfg(not(feature = "provider-anthropic"))]
fn build_anthropic_provider(
    _credentials: Arc<SecureCredentialManager>,
    _config: ProviderBuildConfig,
    _http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-anthropic feature is not enabled on parley",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderErrorKind;

    #[test]
    fn blank_api_key_is_rejected() {
        let error = build_provider_with_config(
            ProviderBuildConfig::new(ProviderId::Anthropic).with_api_key("   "),
        )
        .err().expect("blank key should fail");
        assert_eq!(error.kind, ProviderErrorKind::Authentication);
    }

    #[test]
    fn anthropic_provider_builds_without_key() {
        let provider = build_provider_with_config(
            ProviderBuildConfig::new(ProviderId::Anthropic)
                .with_base_url("http://127.0.0.1:9/v1")
                .with_timeout(Duration::from_secs(5))
                .with_max_tokens(512),
        )
        .expect("provider should build");
        assert_eq!(provider.id(), ProviderId::Anthropic);
    }

    #[test]
    fn openai_provider_requires_key() {
        let error = build_provider_with_config(ProviderBuildConfig::new(ProviderId::OpenAi))
            .err().expect("missing key should fail");
        assert_eq!(error.kind, ProviderErrorKind::Authentication);
    }

    #[test]
    fn openai_key_prefix_is_checked() {
        let error = build_provider_with_config(
            ProviderBuildConfig::new(ProviderId::OpenAi).with_api_key("not-a-key"),
        )
        .err().expect("bad prefix should fail");
        assert_eq!(error.kind, ProviderErrorKind::Authentication);

        let provider = build_provider_with_config(
            ProviderBuildConfig::new(ProviderId::OpenAi).with_api_key("sk-test"),
        )
        .expect("provider should build");
        assert_eq!(provider.id(), ProviderId::OpenAi);
    }

    #[test]
    fn debug_output_redacts_key() {
        let config = ProviderBuildConfig::new(ProviderId::OpenAi).with_api_key("sk-secret");
        assert!(!format!("{config:?}").contains("sk-secret"));
    }
}
