//! Startup configuration failures.

use std::error::Error;
use std::fmt::{Display, Formatter};

use pprovider::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    Io,
    Parse,
    InvalidTool,
    DuplicateTool,
    InvalidSchema,
    Provider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub message: String,
}

impl ConfigError {
    pub fn new(kind: ConfigErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::Io, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::Parse, message)
    }

    pub fn invalid_tool(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::InvalidTool, message)
    }

    pub fn duplicate_tool(name: &str) -> Self {
        Self::new(
            ConfigErrorKind::DuplicateTool,
            format!("tool '{name}' is defined more than once"),
        )
    }

    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::InvalidSchema, message)
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ConfigError {}

impl From<ProviderError> for ConfigError {
    fn from(value: ProviderError) -> Self {
        Self::new(ConfigErrorKind::Provider, value.to_string())
    }
}
