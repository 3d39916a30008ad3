//! Tools backed by a local command.
//!
//! The call's JSON arguments are written to the child's stdin and its stdout
//! becomes the tool output. The child's environment also carries
//! `PARLEY_MODEL`, `PARLEY_TOOL_NAME` and `PARLEY_TOOL_ROUND`.
//!
//! Arguments are checked before anything is spawned: they must be a JSON
//! object, and every key the schema lists under `required` must be present.
//! A required key declared `"type": "string"` must hold a string.

use std::process::Stdio;

use pprovider::ToolDefinition;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::{
    Tool, ToolError, ToolExecutionContext, ToolFuture, parse_json_object, parse_json_value,
    required_string,
};

pub const DEFAULT_INPUT_SCHEMA: &str = r#"{"type":"object","properties":{}}"#;

#[derive(Debug, Clone, PartialEq, Eq)]
struct RequiredArgument {
    name: String,
    string: bool,
}

fn required_arguments(input_schema: &str) -> Vec<RequiredArgument> {
    let Ok(Value::Object(schema)) = parse_json_value(input_schema) else {
        return Vec::new();
    };
    let properties = schema.get("properties").and_then(Value::as_object);

    schema
        .get("required")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(|name| RequiredArgument {
            string: properties
                .and_then(|properties| properties.get(name))
                .and_then(|property| property.get("type"))
                .and_then(Value::as_str)
                == Some("string"),
            name: name.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTool {
    definition: ToolDefinition,
    program: String,
    args: Vec<String>,
    required: Vec<RequiredArgument>,
}

impl CommandTool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        program: impl Into<String>,
    ) -> Self {
        Self {
            definition: ToolDefinition {
                name: name.into(),
                description: description.into(),
                input_schema: DEFAULT_INPUT_SCHEMA.to_string(),
            },
            program: program.into(),
            args: Vec::new(),
            required: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_input_schema(mut self, input_schema: impl Into<String>) -> Self {
        self.definition.input_schema = input_schema.into();
        self.required = required_arguments(&self.definition.input_schema);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn check_arguments(&self, args_json: &str) -> Result<(), ToolError> {
        let args = parse_json_object(args_json)?;
        for argument in &self.required {
            if argument.string {
                required_string(&args, &argument.name)?;
            } else if !args.contains_key(&argument.name) {
                return Err(ToolError::invalid_arguments(format!(
                    "missing required argument: '{}'",
                    argument.name
                )));
            }
        }
        Ok(())
    }

    async fn run(
        &self,
        args_json: &str,
        context: &ToolExecutionContext,
    ) -> Result<String, ToolError> {
        self.check_arguments(args_json)?;
        let input = if args_json.trim().is_empty() {
            "{}"
        } else {
            args_json
        };

        tracing::debug!(
            tool = %self.definition.name,
            program = %self.program,
            round = context.round,
            "spawning tool command"
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("PARLEY_MODEL", &context.model)
            .env("PARLEY_TOOL_NAME", &self.definition.name)
            .env("PARLEY_TOOL_ROUND", context.round.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                ToolError::execution(format!("failed to start '{}': {err}", self.program))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A command that ignores its input may close stdin early.
            if let Err(err) = stdin.write_all(input.as_bytes()).await
                && err.kind() != std::io::ErrorKind::BrokenPipe
            {
                return Err(ToolError::execution(format!(
                    "failed to write arguments to '{}': {err}",
                    self.program
                )));
            }
        }

        let output = child.wait_with_output().await.map_err(|err| {
            ToolError::execution(format!("failed to wait for '{}': {err}", self.program))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ToolError::execution(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}

impl Tool for CommandTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        Box::pin(self.run(args_json, context))
    }
}
