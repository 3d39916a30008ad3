//! Dispatch errors and conversion from chat-layer failures.
//!
//! ```rust
//! use pdispatch::{DispatchError, DispatchErrorKind};
//!
//! let err = DispatchError::configuration("OPENAI_API_KEY is not set");
//! assert_eq!(err.kind, DispatchErrorKind::Configuration);
//! assert!(err.to_string().starts_with("Configuration: "));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use pchat::ChatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchErrorKind {
    /// The selected provider has no backend configured.
    Configuration,
    ProviderCall,
    InvalidRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchError {
    pub kind: DispatchErrorKind,
    pub message: String,
}

impl DispatchError {
    pub fn new(kind: DispatchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorKind::Configuration, message)
    }

    pub fn provider_call(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorKind::ProviderCall, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorKind::InvalidRequest, message)
    }
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for DispatchError {}

impl From<ChatError> for DispatchError {
    fn from(value: ChatError) -> Self {
        DispatchError::provider_call(value.to_string())
    }
}
