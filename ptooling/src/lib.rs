//! Tools the model may call mid-response: registration, lookup and execution.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use pprovider::ToolDefinition;
//! use ptooling::{ToolCallbackSource, ToolRegistry};
//!
//! let mut registry = ToolRegistry::new();
//! registry.register_sync_fn(
//!     ToolDefinition {
//!         name: "ping".to_string(),
//!         description: "Replies pong".to_string(),
//!         input_schema: r#"{"type":"object"}"#.to_string(),
//!     },
//!     |_args, _ctx| Ok("pong".to_string()),
//! );
//!
//! let source: Arc<dyn ToolCallbackSource> = Arc::new(registry);
//! assert_eq!(source.definitions()[0].name, "ping");
//! ```

mod args;
mod command;
mod error;
mod hooks;
mod registry;
mod runtime;
mod source;
mod tool;
mod types;

pub mod prelude {
    pub use crate::{
        CommandTool, DefaultToolRuntime, FunctionTool, Tool, ToolCallbackSource, ToolError,
        ToolErrorKind, ToolExecutionContext, ToolExecutionResult, ToolFuture, ToolRegistry,
        ToolRuntime, ToolRuntimeHooks,
    };
}

pub use args::{parse_json_object, parse_json_value, required_string};
pub use command::{CommandTool, DEFAULT_INPUT_SCHEMA};
pub use error::{ToolError, ToolErrorKind};
pub use hooks::{NoopToolRuntimeHooks, ToolRuntimeHooks};
pub use registry::ToolRegistry;
pub use runtime::{DefaultToolRuntime, ToolRuntime};
pub use source::ToolCallbackSource;
pub use tool::{FunctionTool, Tool, ToolFuture};
pub use types::{ToolExecutionContext, ToolExecutionResult};
