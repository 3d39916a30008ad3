//! Anthropic-specific credential helpers and auth resolution policy.

use crate::{ProviderError, ProviderId, SecureCredentialManager};

use super::types::AnthropicAuth;

impl SecureCredentialManager {
    /// Stores an Anthropic API key; keys are expected to start with `sk-ant-`.
    pub fn set_anthropic_api_key(&self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        let api_key = api_key.into();
        if !api_key.trim().starts_with("sk-ant-") {
            return Err(ProviderError::authentication(
                "Anthropic API key must start with 'sk-ant-'",
            ));
        }

        self.set_api_key(ProviderId::Anthropic, api_key.trim())
    }
}

pub(crate) fn resolve_anthropic_auth(
    credentials: &SecureCredentialManager,
) -> Result<AnthropicAuth, ProviderError> {
    credentials
        .api_key(ProviderId::Anthropic)?
        .map(AnthropicAuth)
        .ok_or_else(|| ProviderError::authentication("no Anthropic API key configured"))
}
