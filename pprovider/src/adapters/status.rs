//! HTTP status and error-body classification shared by the HTTP adapters.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::ProviderError;

/// Maps a non-success status into a provider error, preferring the vendor's
/// `{"error":{"message":...}}` body text when present.
pub(crate) fn error_for_status(vendor: &str, status: StatusCode, body: &str) -> ProviderError {
    let message = extract_error_message(body)
        .unwrap_or_else(|| format!("{vendor} request failed with status {status}"));

    let code = status.as_u16();
    let error = match code {
        401 | 403 => ProviderError::authentication(message),
        429 => ProviderError::rate_limited(message),
        408 | 504 => ProviderError::timeout(message),
        400 | 404 | 422 => ProviderError::invalid_request(message),
        502 | 503 | 529 => ProviderError::unavailable(message),
        _ => ProviderError::transport(message),
    };
    error.with_status(code)
}

pub(crate) fn error_for_send(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::timeout(err.to_string())
    } else {
        ProviderError::transport(err.to_string())
    }
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}
