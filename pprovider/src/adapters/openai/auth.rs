use crate::{ProviderError, ProviderId, SecureCredentialManager};

use super::types::OpenAiAuth;

const OPENAI_KEY_PREFIX: &str = "sk-";

impl SecureCredentialManager {
    /// Stores an OpenAI API key; keys are expected to start with `sk-`.
    pub fn set_openai_api_key(&self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        let api_key = api_key.into();
        let api_key = api_key.trim();
        if !api_key.starts_with(OPENAI_KEY_PREFIX) {
            return Err(ProviderError::authentication(format!(
                "OpenAI API key must start with '{OPENAI_KEY_PREFIX}'"
            )));
        }

        self.set_api_key(ProviderId::OpenAi, api_key)
    }
}

pub(crate) fn resolve_openai_auth(
    credentials: &SecureCredentialManager,
) -> Result<OpenAiAuth, ProviderError> {
    match credentials.api_key(ProviderId::OpenAi)? {
        Some(api_key) => Ok(OpenAiAuth(api_key)),
        None => Err(ProviderError::authentication(
            "no OpenAI API key configured; set OPENAI_API_KEY",
        )),
    }
}
