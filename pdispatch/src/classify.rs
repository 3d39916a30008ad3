//! Model-name conventions that decide the provider and its request options.

use pchat::RequestOptions;
use pprovider::ProviderId;

/// Model used when the caller gives no override.
pub const DEFAULT_MODEL: &str = "claude-haiku-4-5";

/// Fixed sampling temperature for OpenAI requests.
pub const OPENAI_TEMPERATURE: f32 = 1.0;

/// OpenAI when the name contains `gpt-` or starts with `o1-` / `o3-`;
/// everything else, including no override, goes to Anthropic.
pub fn classify_model(model_override: Option<&str>) -> ProviderId {
    match model_override {
        Some(model)
            if model.contains("gpt-") || model.starts_with("o1-") || model.starts_with("o3-") =>
        {
            ProviderId::OpenAi
        }
        _ => ProviderId::Anthropic,
    }
}

pub fn resolve_model_id(model_override: Option<&str>) -> String {
    model_override.unwrap_or(DEFAULT_MODEL).to_string()
}

pub fn request_options(provider: ProviderId, model_id: impl Into<String>) -> RequestOptions {
    let options = RequestOptions::new(model_id);
    match provider {
        ProviderId::OpenAi => options.with_temperature(OPENAI_TEMPERATURE),
        ProviderId::Anthropic => options,
    }
}
