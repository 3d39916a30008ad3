//! `ChatBackend` over a model provider, with an in-call tool loop.

use std::sync::Arc;
use std::time::Duration;

use pprovider::{Message, ModelProvider, ModelRequest, Role, TokenUsage};
use ptooling::{
    DefaultToolRuntime, NoopToolRuntimeHooks, ToolExecutionContext, ToolExecutionResult,
    ToolRegistry, ToolRuntime, ToolRuntimeHooks,
};

use crate::{ChatBackend, ChatError, ChatFuture, ChatReply, ChatRequest};

pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatPolicy {
    /// Provider round trips allowed after the first one.
    pub max_tool_rounds: usize,
    pub tool_timeout: Option<Duration>,
}

impl Default for ChatPolicy {
    fn default() -> Self {
        Self {
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            tool_timeout: None,
        }
    }
}

#[derive(Clone)]
pub struct ChatClient {
    provider: Arc<dyn ModelProvider>,
    policy: ChatPolicy,
    tool_hooks: Arc<dyn ToolRuntimeHooks>,
}

impl ChatClient {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self::builder(provider).build()
    }

    pub fn builder(provider: Arc<dyn ModelProvider>) -> ChatClientBuilder {
        ChatClientBuilder::new(provider)
    }

    pub fn policy(&self) -> ChatPolicy {
        self.policy
    }

    fn model_request(
        &self,
        request: &ChatRequest,
        messages: &[Message],
        tools: &ToolRegistry,
    ) -> Result<ModelRequest, ChatError> {
        let mut builder = ModelRequest::builder(request.options.model_id.clone())
            .messages(messages.to_vec())
            .tools(tools.definitions());

        if let Some(temperature) = request.options.temperature {
            builder = builder.temperature(temperature);
        }

        Ok(builder.build()?)
    }

    async fn run(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        if request.prompt.trim().is_empty() {
            return Err(ChatError::invalid_request("prompt must not be empty"));
        }

        let registry = Arc::new(ToolRegistry::from_tools(request.tools.iter().cloned()));
        let runtime = DefaultToolRuntime::new(Arc::clone(&registry))
            .with_hooks(Arc::clone(&self.tool_hooks))
            .with_timeout(self.policy.tool_timeout);

        let mut messages = vec![Message::new(Role::User, request.prompt.clone())];
        let mut usage = TokenUsage::default();
        let mut rounds = 0;

        loop {
            let model_request = self.model_request(&request, &messages, &registry)?;
            let response = self.provider.complete(model_request).await?;
            usage.accumulate(response.usage);

            let tool_calls = response.tool_calls();
            if tool_calls.is_empty() {
                return Ok(ChatReply {
                    text: response.text(),
                    model: response.model,
                    stop_reason: response.stop_reason,
                    usage,
                    tool_rounds: rounds,
                });
            }

            if rounds >= self.policy.max_tool_rounds {
                return Err(ChatError::tooling(format!(
                    "model kept requesting tools after {} rounds",
                    self.policy.max_tool_rounds
                )));
            }
            rounds += 1;

            tracing::debug!(
                provider = %self.provider.id(),
                model = %request.options.model_id,
                round = rounds,
                tool_calls = tool_calls.len(),
                "executing requested tools"
            );

            messages.push(Message::assistant_tool_calls(
                response.text(),
                tool_calls.clone(),
            ));

            for call in tool_calls {
                let context =
                    ToolExecutionContext::new(request.options.model_id.clone()).with_round(rounds);
                let call_id = call.id.clone();
                let result = runtime
                    .execute(call, context)
                    .await
                    .unwrap_or_else(|error| {
                        ToolExecutionResult::new(call_id, error.model_feedback())
                    });
                messages.push(Message::tool_result(result.into_tool_result()));
            }
        }
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("provider", &self.provider.id())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ChatBackend for ChatClient {
    fn call<'a>(&'a self, request: ChatRequest) -> ChatFuture<'a, Result<ChatReply, ChatError>> {
        Box::pin(self.run(request))
    }
}

pub struct ChatClientBuilder {
    provider: Arc<dyn ModelProvider>,
    policy: ChatPolicy,
    tool_hooks: Arc<dyn ToolRuntimeHooks>,
}

impl ChatClientBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            policy: ChatPolicy::default(),
            tool_hooks: Arc::new(NoopToolRuntimeHooks),
        }
    }

    pub fn policy(mut self, policy: ChatPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.policy.max_tool_rounds = max_tool_rounds;
        self
    }

    pub fn tool_timeout(mut self, tool_timeout: Option<Duration>) -> Self {
        self.policy.tool_timeout = tool_timeout;
        self
    }

    pub fn tool_hooks(mut self, tool_hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.tool_hooks = tool_hooks;
        self
    }

    pub fn build(self) -> ChatClient {
        ChatClient {
            provider: self.provider,
            policy: self.policy,
            tool_hooks: self.tool_hooks,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pprovider::{
        ModelResponse, OutputItem, ProviderError, ProviderFuture, ProviderId, StopReason,
    };

    use super::*;
    use crate::{ChatErrorKind, RequestOptions};

    #[derive(Default)]
    struct CapturingProvider {
        requests: Mutex<Vec<ModelRequest>>,
    }

    impl ModelProvider for CapturingProvider {
        fn id(&self) -> ProviderId {
            ProviderId::Anthropic
        }

        fn complete<'a>(
            &'a self,
            request: ModelRequest,
        ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
            Box::pin(async move {
                let model = request.model.clone();
                self.requests.lock().expect("requests lock").push(request);
                Ok(ModelResponse {
                    provider: ProviderId::Anthropic,
                    model,
                    output: vec![OutputItem::Message(Message::new(Role::Assistant, "hi"))],
                    stop_reason: StopReason::EndTurn,
                    usage: TokenUsage {
                        input_tokens: 3,
                        output_tokens: 1,
                        total_tokens: 4,
                    },
                })
            })
        }
    }

    #[tokio::test]
    async fn plain_prompt_is_one_user_message_with_requested_options() {
        let provider = Arc::new(CapturingProvider::default());
        let client = ChatClient::new(Arc::clone(&provider) as Arc<dyn ModelProvider>);

        let reply = client
            .call(ChatRequest::new(
                "hello",
                RequestOptions::new("claude-haiku-4-5"),
            ))
            .await
            .expect("call should succeed");

        assert_eq!(reply.text, "hi");
        assert_eq!(reply.tool_rounds, 0);
        assert_eq!(reply.usage.total_tokens, 4);

        let requests = provider.requests.lock().expect("requests lock");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "claude-haiku-4-5");
        assert_eq!(requests[0].messages, vec![Message::new(Role::User, "hello")]);
        assert_eq!(requests[0].options.temperature, None);
        // Token caps are the provider's default, never set per request.
        assert_eq!(requests[0].options.max_tokens, None);
        assert!(requests[0].tools.is_empty());
    }

    #[tokio::test]
    async fn blank_prompt_never_reaches_provider() {
        let provider = Arc::new(CapturingProvider::default());
        let client = ChatClient::new(Arc::clone(&provider) as Arc<dyn ModelProvider>);

        let error = client
            .call(ChatRequest::new("   ", RequestOptions::new("gpt-4o")))
            .await
            .expect_err("blank prompt should fail");

        assert_eq!(error.kind, ChatErrorKind::InvalidRequest);
        assert!(provider.requests.lock().expect("requests lock").is_empty());
    }

    #[tokio::test]
    async fn out_of_range_temperature_is_provider_validation_error() {
        let provider = Arc::new(CapturingProvider::default());
        let client = ChatClient::new(Arc::clone(&provider) as Arc<dyn ModelProvider>);

        let error = client
            .call(ChatRequest::new(
                "hi",
                RequestOptions::new("gpt-4o").with_temperature(3.5),
            ))
            .await
            .expect_err("temperature should be rejected");

        assert_eq!(error.kind, ChatErrorKind::Provider);
        assert!(provider.requests.lock().expect("requests lock").is_empty());
    }

    #[test]
    fn default_policy_allows_eight_tool_rounds() {
        let policy = ChatPolicy::default();
        assert_eq!(policy.max_tool_rounds, 8);
        assert_eq!(policy.tool_timeout, None);
    }
}
