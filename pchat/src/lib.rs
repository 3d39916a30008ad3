//! Chat backends: one prompt in, one model answer out.
//!
//! [`ChatBackend`] is the seam the dispatcher calls through. [`ChatClient`]
//! implements it over any [`pprovider::ModelProvider`], running requested
//! tools between provider round trips until the model produces text.

mod backend;
mod client;
mod error;
mod types;

pub mod prelude {
    pub use crate::{
        ChatBackend, ChatClient, ChatClientBuilder, ChatError, ChatErrorKind, ChatFuture,
        ChatPolicy, ChatReply, ChatRequest, RequestOptions,
    };
    pub use ptooling::{Tool, ToolRuntimeHooks};
}

pub use backend::{ChatBackend, ChatFuture};
pub use client::{ChatClient, ChatClientBuilder, ChatPolicy, DEFAULT_MAX_TOOL_ROUNDS};
pub use error::{ChatError, ChatErrorKind};
pub use types::{ChatReply, ChatRequest, RequestOptions};
