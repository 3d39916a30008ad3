//! Focused unit tests for Anthropic adapter internals.

#![cfg(test)]

use std::sync::Arc;

use serde_json::json;

use crate::{
    Message, ModelRequest, ProviderError, ProviderErrorKind, ProviderFuture, Role,
    SecureCredentialManager, StopReason, ToolCall, ToolDefinition, ToolResult,
};

use super::provider::{AnthropicProvider, DEFAULT_ANTHROPIC_MAX_TOKENS};
use super::serde_api::{AnthropicApiResponse, build_api_request, parse_stop_reason};
use super::transport::AnthropicTransport;
use super::types::{
    AnthropicAuth, AnthropicContent, AnthropicRequest, AnthropicResponse, AnthropicRole,
    AnthropicStopReason,
};

#[derive(Debug)]
struct NoopTransport;

impl AnthropicTransport for NoopTransport {
    fn complete<'a>(
        &'a self,
        _request: AnthropicRequest,
        _auth: AnthropicAuth,
    ) -> ProviderFuture<'a, Result<AnthropicResponse, ProviderError>> {
        Box::pin(async { Err(ProviderError::other("not used")) })
    }
}

fn provider() -> AnthropicProvider {
    AnthropicProvider::new(
        Arc::new(SecureCredentialManager::new()),
        Arc::new(NoopTransport),
    )
}

fn clock_call(id: &str) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        name: "clock".to_string(),
        arguments: "{}".to_string(),
    }
}

#[test]
fn system_messages_move_to_top_level_prompt() {
    let request = ModelRequest::new(
        "claude-haiku-4-5",
        vec![
            Message::new(Role::System, "be brief"),
            Message::new(Role::System, "answer in English"),
            Message::new(Role::User, "hello"),
        ],
    );

    let built = provider().build_anthropic_request(request);
    assert_eq!(built.system.as_deref(), Some("be brief\n\nanswer in English"));
    assert_eq!(built.messages.len(), 1);
    assert_eq!(built.messages[0].role, AnthropicRole::User);
}

#[test]
fn max_tokens_falls_back_to_provider_default() {
    let request = ModelRequest::new("claude-haiku-4-5", vec![Message::new(Role::User, "hi")]);
    let built = provider().build_anthropic_request(request.clone());
    assert_eq!(built.max_tokens, DEFAULT_ANTHROPIC_MAX_TOKENS);
    assert_eq!(built.temperature, None);

    let built = provider()
        .with_default_max_tokens(1024)
        .build_anthropic_request(request.clone());
    assert_eq!(built.max_tokens, 1024);

    let built = provider().build_anthropic_request(request.with_max_tokens(64));
    assert_eq!(built.max_tokens, 64);
}

#[test]
fn consecutive_tool_results_share_one_user_turn() {
    let request = ModelRequest::new(
        "claude-haiku-4-5",
        vec![
            Message::new(Role::User, "what time is it in two zones"),
            Message::assistant_tool_calls("checking", vec![clock_call("a"), clock_call("b")]),
            Message::tool_result(ToolResult {
                tool_call_id: "a".to_string(),
                output: "12:00".to_string(),
            }),
            Message::tool_result(ToolResult {
                tool_call_id: "b".to_string(),
                output: "18:00".to_string(),
            }),
        ],
    );

    let built = provider().build_anthropic_request(request);
    assert_eq!(built.messages.len(), 3);
    assert_eq!(built.messages[1].role, AnthropicRole::Assistant);
    assert_eq!(built.messages[1].content.len(), 3);
    assert_eq!(built.messages[2].role, AnthropicRole::User);
    assert_eq!(
        built.messages[2].content,
        vec![
            AnthropicContent::ToolResult {
                tool_use_id: "a".to_string(),
                content: "12:00".to_string(),
            },
            AnthropicContent::ToolResult {
                tool_use_id: "b".to_string(),
                content: "18:00".to_string(),
            },
        ]
    );
}

#[test]
fn api_request_serializes_content_blocks_and_tools() {
    let request = ModelRequest::new(
        "claude-haiku-4-5",
        vec![
            Message::new(Role::User, "time?"),
            Message::assistant_tool_calls(
                "",
                vec![ToolCall {
                    id: "toolu_1".to_string(),
                    name: "clock".to_string(),
                    arguments: String::new(),
                }],
            ),
            Message::tool_result(ToolResult {
                tool_call_id: "toolu_1".to_string(),
                output: "noon".to_string(),
            }),
        ],
    )
    .with_temperature(0.5)
    .with_tools(vec![ToolDefinition {
        name: "clock".to_string(),
        description: "Current time".to_string(),
        input_schema: r#"{"type":"object"}"#.to_string(),
    }]);

    let api_request = build_api_request(provider().build_anthropic_request(request))
        .expect("request should build");
    let value = serde_json::to_value(&api_request).expect("request should serialize");

    assert_eq!(value["max_tokens"], 4096);
    assert_eq!(value["temperature"], 0.5);
    assert!(value.get("system").is_none());
    assert_eq!(value["messages"][0]["content"][0]["type"], "text");
    assert_eq!(value["messages"][1]["content"][0]["type"], "tool_use");
    assert_eq!(value["messages"][1]["content"][0]["input"], json!({}));
    assert_eq!(value["messages"][2]["content"][0]["type"], "tool_result");
    assert_eq!(value["messages"][2]["content"][0]["tool_use_id"], "toolu_1");
    assert_eq!(value["tools"][0]["input_schema"], json!({"type": "object"}));
}

#[test]
fn malformed_tool_arguments_are_rejected() {
    let request = ModelRequest::new(
        "claude-haiku-4-5",
        vec![
            Message::new(Role::User, "time?"),
            Message::assistant_tool_calls(
                "",
                vec![ToolCall {
                    id: "toolu_1".to_string(),
                    name: "clock".to_string(),
                    arguments: "{oops".to_string(),
                }],
            ),
        ],
    );

    let error = build_api_request(provider().build_anthropic_request(request))
        .expect_err("arguments must be JSON");
    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
}

#[test]
fn whitespace_preamble_before_tool_use_is_dropped() {
    let request = ModelRequest::new(
        "claude-haiku-4-5",
        vec![
            Message::new(Role::User, "what time is it?"),
            Message::assistant_tool_calls("\n\n", vec![clock_call("toolu_1")]),
            Message::tool_result(ToolResult {
                tool_call_id: "toolu_1".to_string(),
                output: "noon".to_string(),
            }),
        ],
    );

    let built = provider().build_anthropic_request(request);
    assert_eq!(
        built.messages[1].content,
        vec![AnthropicContent::ToolUse(clock_call("toolu_1"))]
    );

    let api_request = build_api_request(built).expect("follow-up request should build");
    let value = serde_json::to_value(&api_request).expect("request should serialize");
    assert_eq!(value["messages"][1]["content"][0]["type"], "tool_use");
    assert_eq!(value["messages"][2]["content"][0]["type"], "tool_result");
}

#[test]
fn blank_user_text_is_rejected() {
    let request = ModelRequest::new("claude-haiku-4-5", vec![Message::new(Role::User, "  ")]);
    let error = build_api_request(provider().build_anthropic_request(request))
        .expect_err("blank text must fail");
    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
}

#[test]
fn parse_stop_reason_maps_expected_values() {
    assert_eq!(
        parse_stop_reason(Some("end_turn")),
        AnthropicStopReason::EndTurn
    );
    assert_eq!(
        parse_stop_reason(Some("tool_use")),
        AnthropicStopReason::ToolUse
    );
    assert_eq!(
        parse_stop_reason(Some("max_tokens")),
        AnthropicStopReason::MaxTokens
    );
    assert_eq!(
        parse_stop_reason(Some("refusal")),
        AnthropicStopReason::Refusal
    );
    assert_eq!(parse_stop_reason(None), AnthropicStopReason::Other);
}

#[test]
fn api_response_maps_into_model_response() {
    let parsed: AnthropicApiResponse = serde_json::from_value(json!({
        "id": "msg_1",
        "type": "message",
        "role": "assistant",
        "model": "claude-haiku-4-5-20251001",
        "content": [
            { "type": "thinking", "thinking": "hmm", "signature": "x" },
            { "type": "text", "text": "Let me check." },
            { "type": "tool_use", "id": "toolu_9", "name": "clock", "input": { "tz": "UTC" } }
        ],
        "stop_reason": "tool_use",
        "usage": { "input_tokens": 11, "output_tokens": 7 }
    }))
    .expect("payload should parse");

    let response = AnthropicResponse::from(parsed).into_model_response();

    assert_eq!(response.model, "claude-haiku-4-5-20251001");
    assert_eq!(response.stop_reason, StopReason::ToolUse);
    assert_eq!(response.text(), "Let me check.");
    assert_eq!(response.tool_calls()[0].id, "toolu_9");
    assert_eq!(response.tool_calls()[0].arguments, r#"{"tz":"UTC"}"#);
    assert_eq!(response.usage.total_tokens, 18);
}

#[test]
fn anthropic_key_prefix_is_enforced() {
    let credentials = SecureCredentialManager::new();
    let error = credentials
        .set_anthropic_api_key("sk-openai-key")
        .expect_err("wrong prefix should fail");
    assert_eq!(error.kind, ProviderErrorKind::Authentication);

    credentials
        .set_anthropic_api_key("sk-ant-valid")
        .expect("key should store");
    assert!(
        credentials
            .has_credentials(crate::ProviderId::Anthropic)
            .expect("lock")
    );
}
