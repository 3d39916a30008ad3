//! Provider failures.
//!
//! ```rust
//! use pprovider::{ProviderError, ProviderErrorKind};
//!
//! let error = ProviderError::authentication("invalid x-api-key").with_status(401);
//! assert_eq!(error.kind, ProviderErrorKind::Authentication);
//! assert_eq!(error.to_string(), "Authentication (HTTP 401): invalid x-api-key");
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Authentication,
    RateLimited,
    InvalidRequest,
    Timeout,
    Transport,
    Unavailable,
    Other,
}

impl ProviderErrorKind {
    /// Whether a later identical call could plausibly succeed.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::Timeout | Self::Transport | Self::Unavailable
        )
    }
}

/// Failure reported by a model provider.
///
/// `retryable` is informational only; nothing in this workspace retries.
/// `status` is set when the failure came from a non-success HTTP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
    pub retryable: bool,
    pub status: Option<u16>,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable: kind.is_transient(),
            status: None,
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Authentication, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::RateLimited, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidRequest, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Timeout, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Transport, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unavailable, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Other, message)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{:?} (HTTP {status}): {}", self.kind, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryability_follows_the_kind() {
        assert!(!ProviderError::authentication("bad key").retryable);
        assert!(!ProviderError::invalid_request("empty prompt").retryable);
        assert!(ProviderError::timeout("request timed out").retryable);
        assert!(ProviderError::rate_limited("try later").retryable);
        assert!(ProviderError::unavailable("overloaded").retryable);
    }

    #[test]
    fn display_mentions_the_http_status_only_when_known() {
        assert_eq!(
            ProviderError::unavailable("overloaded").to_string(),
            "Unavailable: overloaded"
        );
        assert_eq!(
            ProviderError::rate_limited("slow down")
                .with_status(429)
                .to_string(),
            "RateLimited (HTTP 429): slow down"
        );
    }
}
