//! The backend capability the dispatcher calls through.

use pcommon::BoxFuture;

use crate::{ChatError, ChatReply, ChatRequest};

pub type ChatFuture<'a, T> = BoxFuture<'a, T>;

/// One provider's call API: send a prompt with options and tools, get text.
pub trait ChatBackend: Send + Sync {
    fn call<'a>(&'a self, request: ChatRequest) -> ChatFuture<'a, Result<ChatReply, ChatError>>;
}
