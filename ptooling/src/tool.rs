//! The `Tool` contract and `FunctionTool`, a tool backed by an async closure.
//!
//! Tools receive the raw JSON arguments the model produced and answer with
//! plain text that is fed back as the tool result.
//!
//! ```rust
//! use futures_util::FutureExt;
//! use pprovider::ToolDefinition;
//! use ptooling::{FunctionTool, Tool, ToolExecutionContext, parse_json_object, required_string};
//!
//! let word_count = FunctionTool::new(
//!     ToolDefinition {
//!         name: "word_count".to_string(),
//!         description: "Counts the words in a text".to_string(),
//!         input_schema: r#"{"type":"object","properties":{"text":{"type":"string"}},"required":["text"]}"#
//!             .to_string(),
//!     },
//!     |args, _ctx| async move {
//!         let args = parse_json_object(&args)?;
//!         let text = required_string(&args, "text")?;
//!         Ok(text.split_whitespace().count().to_string())
//!     },
//! );
//!
//! let context = ToolExecutionContext::new("claude-haiku-4-5");
//! let output = word_count
//!     .invoke(r#"{"text":"one small step"}"#, &context)
//!     .now_or_never()
//!     .expect("closure completes immediately")
//!     .expect("arguments are valid");
//! assert_eq!(output, "3");
//! ```

use std::future::Future;
use std::sync::Arc;

use pcommon::BoxFuture;
use pprovider::ToolDefinition;

use crate::{ToolError, ToolExecutionContext};

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

pub trait Tool: Send + Sync {
    /// Name, description and JSON schema advertised to the model.
    fn definition(&self) -> ToolDefinition;

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>>;
}

type Handler =
    dyn Fn(String, ToolExecutionContext) -> ToolFuture<'static, Result<String, ToolError>>
        + Send
        + Sync;

/// Adapts an async closure into a [`Tool`].
///
/// The closure owns its inputs, so each invocation clones the arguments and
/// the context.
pub struct FunctionTool {
    definition: ToolDefinition,
    handler: Arc<Handler>,
}

impl FunctionTool {
    pub fn new<F, Fut>(definition: ToolDefinition, handler: F) -> Self
    where
        F: Fn(String, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        let handler: Arc<Handler> =
            Arc::new(move |args_json, context| Box::pin(handler(args_json, context)));

        Self {
            definition,
            handler,
        }
    }
}

impl std::fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.definition.name)
            .finish_non_exhaustive()
    }
}

impl Tool for FunctionTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        (self.handler)(args_json.to_owned(), context.clone())
    }
}
