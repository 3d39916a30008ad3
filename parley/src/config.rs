//! Process configuration: command-line flags with environment fallbacks,
//! and the TOML file describing command-backed tools.
//!
//! ```rust
//! use parley::config::ToolsFile;
//!
//! let file = ToolsFile::parse(
//!     r#"
//!     [[tools]]
//!     name = "utc_time"
//!     description = "Current UTC time"
//!     command = "date"
//!     args = ["-u"]
//!     "#,
//! )
//! .expect("tools file should parse");
//!
//! let registry = file.into_registry().expect("registry should build");
//! assert_eq!(registry.names(), vec!["utc_time".to_string()]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use pchat::DEFAULT_MAX_TOOL_ROUNDS;
use pdispatch::PromptRequest;
use pprovider::SecretString;
use ptooling::{CommandTool, ToolRegistry};
use serde::Deserialize;
use serde_json::Value;

use crate::ConfigError;

#[derive(Parser, Clone, PartialEq, Eq)]
#[command(
    name = "parley",
    version,
    about = "Send a prompt to an Anthropic or OpenAI model and print the answer"
)]
pub struct Cli {
    /// Prompt text; omit to start an interactive session
    pub prompt: Option<String>,

    /// Model override; names containing `gpt-` or starting with `o1-`/`o3-` go to OpenAI
    pub model: Option<String>,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    /// OpenAI API key; without it OpenAI models are unavailable
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Anthropic API base URL [default: https://api.anthropic.com/v1]
    #[arg(long, env = "ANTHROPIC_BASE_URL")]
    pub anthropic_base_url: Option<String>,

    /// OpenAI API base URL [default: https://api.openai.com/v1]
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub openai_base_url: Option<String>,

    /// Response token cap sent to Anthropic [default: 4096]
    #[arg(long, env = "PARLEY_ANTHROPIC_MAX_TOKENS")]
    pub anthropic_max_tokens: Option<u32>,

    /// TOML file listing command-backed tools
    #[arg(long = "tools", env = "PARLEY_TOOLS")]
    pub tools_file: Option<PathBuf>,

    /// Follow-up provider calls allowed while the model keeps requesting tools
    #[arg(long, env = "PARLEY_MAX_TOOL_ROUNDS", default_value_t = DEFAULT_MAX_TOOL_ROUNDS)]
    pub max_tool_rounds: usize,

    /// Per-tool execution timeout in seconds; 0 disables it
    #[arg(long, env = "PARLEY_TOOL_TIMEOUT_SECS")]
    pub tool_timeout_secs: Option<u64>,

    /// HTTP request timeout in seconds; 0 disables it
    #[arg(long, env = "PARLEY_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

/// What the process should do with its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    Single(PromptRequest),
}

impl Cli {
    pub fn mode(&self) -> Mode {
        match &self.prompt {
            None => Mode::Interactive,
            Some(prompt) => {
                let request = PromptRequest::new(prompt.clone());
                match &self.model {
                    Some(model) => Mode::Single(request.with_model_override(model.clone())),
                    None => Mode::Single(request),
                }
            }
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            anthropic_api_key: secret(self.anthropic_api_key.as_deref()),
            openai_api_key: secret(self.openai_api_key.as_deref()),
            anthropic_base_url: non_blank(self.anthropic_base_url.as_deref()),
            openai_base_url: non_blank(self.openai_base_url.as_deref()),
            anthropic_max_tokens: self.anthropic_max_tokens,
            tools_file: self.tools_file.clone(),
            max_tool_rounds: self.max_tool_rounds,
            tool_timeout: seconds(self.tool_timeout_secs),
            http_timeout: seconds(self.timeout_secs),
        }
    }
}

impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cli")
            .field("prompt", &self.prompt)
            .field("model", &self.model)
            .field("tools_file", &self.tools_file)
            .finish_non_exhaustive()
    }
}

/// Configuration resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub anthropic_api_key: Option<SecretString>,
    pub openai_api_key: Option<SecretString>,
    pub anthropic_base_url: Option<String>,
    pub openai_base_url: Option<String>,
    pub anthropic_max_tokens: Option<u32>,
    pub tools_file: Option<PathBuf>,
    pub max_tool_rounds: usize,
    pub tool_timeout: Option<Duration>,
    pub http_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            openai_api_key: None,
            anthropic_base_url: None,
            openai_base_url: None,
            anthropic_max_tokens: None,
            tools_file: None,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            tool_timeout: None,
            http_timeout: None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn secret(value: Option<&str>) -> Option<SecretString> {
    non_blank(value).map(SecretString::new)
}

fn seconds(value: Option<u64>) -> Option<Duration> {
    value.filter(|secs| *secs > 0).map(Duration::from_secs)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsFile {
    #[serde(default)]
    pub tools: Vec<ToolEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    pub input_schema: Option<String>,
}

impl ToolEntry {
    fn into_tool(self) -> Result<CommandTool, ConfigError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::invalid_tool("tool name must not be empty"));
        }
        if self.command.trim().is_empty() {
            return Err(ConfigError::invalid_tool(format!(
                "tool '{name}' must name a command"
            )));
        }

        let mut tool = CommandTool::new(name.clone(), self.description, self.command.trim())
            .with_args(self.args);

        if let Some(schema) = self.input_schema {
            match serde_json::from_str::<Value>(&schema) {
                Ok(Value::Object(_)) => tool = tool.with_input_schema(schema),
                Ok(_) => {
                    return Err(ConfigError::invalid_schema(format!(
                        "input_schema of tool '{name}' must be a JSON object"
                    )));
                }
                Err(err) => {
                    return Err(ConfigError::invalid_schema(format!(
                        "input_schema of tool '{name}' is not valid JSON: {err}"
                    )));
                }
            }
        }

        Ok(tool)
    }
}

impl ToolsFile {
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|err| ConfigError::parse(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|err| {
            ConfigError::io(format!("failed to read {}: {err}", path.display()))
        })?;

        Self::parse(&source).map_err(|err| {
            ConfigError::parse(format!("{}: {}", path.display(), err.message))
        })
    }

    /// Builds a registry in file order; names must be unique.
    pub fn into_registry(self) -> Result<ToolRegistry, ConfigError> {
        let mut registry = ToolRegistry::new();
        for entry in self.tools {
            if registry.contains(entry.name.trim()) {
                return Err(ConfigError::duplicate_tool(entry.name.trim()));
            }
            registry.register(entry.into_tool()?);
        }

        Ok(registry)
    }
}
