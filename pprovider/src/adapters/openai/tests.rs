#![cfg(test)]

use std::sync::Arc;

use serde_json::json;

use crate::{
    Message, ModelRequest, ProviderError, ProviderErrorKind, ProviderFuture, Role,
    SecureCredentialManager, StopReason, ToolCall, ToolDefinition, ToolResult,
};

use super::provider::OpenAiProvider;
use super::serde_api::{
    OpenAiApiResponse, OpenAiTokenParameter, build_api_request,
    build_api_request_with_token_parameter, parse_finish_reason,
};
use super::transport::OpenAiTransport;
use super::types::{OpenAiAuth, OpenAiFinishReason, OpenAiMessage, OpenAiRequest, OpenAiResponse};

#[derive(Debug)]
struct UnusedTransport;

impl OpenAiTransport for UnusedTransport {
    fn complete<'a>(
        &'a self,
        _request: OpenAiRequest,
        _auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async { Err(ProviderError::other("transport is not exercised here")) })
    }
}

fn provider() -> OpenAiProvider {
    OpenAiProvider::new(
        Arc::new(SecureCredentialManager::new()),
        Arc::new(UnusedTransport),
    )
}

fn clock_round_trip() -> Vec<Message> {
    vec![
        Message::new(Role::User, "what time is it"),
        Message::assistant_tool_calls(
            "",
            vec![ToolCall {
                id: "call_1".to_string(),
                name: "clock".to_string(),
                arguments: String::new(),
            }],
        ),
        Message::tool_result(ToolResult {
            tool_call_id: "call_1".to_string(),
            output: "12:00".to_string(),
        }),
    ]
}

#[test]
fn messages_keep_their_role_specific_shape() {
    let request = ModelRequest::new("gpt-4o", clock_round_trip()).with_temperature(1.0);
    let built = provider()
        .to_openai_request(request)
        .expect("request should convert");

    assert_eq!(built.messages[0], OpenAiMessage::User("what time is it".to_string()));
    assert!(matches!(
        &built.messages[1],
        OpenAiMessage::Assistant { tool_calls, .. } if tool_calls.len() == 1
    ));
    assert_eq!(
        built.messages[2],
        OpenAiMessage::Tool {
            tool_call_id: "call_1".to_string(),
            content: "12:00".to_string(),
        }
    );
    assert_eq!(built.temperature, Some(1.0));
}

#[test]
fn tool_message_without_call_id_is_rejected() {
    let orphan = Message::new(Role::Tool, "12:00");
    let error = OpenAiMessage::try_from(orphan).expect_err("tool message needs an id");
    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
}

#[test]
fn wire_request_tags_roles_and_omits_empty_assistant_text() {
    let request = ModelRequest::new("gpt-4o", clock_round_trip()).with_tools(vec![ToolDefinition {
        name: "clock".to_string(),
        description: "Current time".to_string(),
        input_schema: r#"{"type":"object"}"#.to_string(),
    }]);

    let body = build_api_request(
        provider()
            .to_openai_request(request)
            .expect("request should convert"),
    )
    .expect("request should build");
    let value = serde_json::to_value(&body).expect("request should serialize");

    assert_eq!(value["messages"][0], json!({"role": "user", "content": "what time is it"}));
    assert_eq!(value["messages"][1]["role"], "assistant");
    assert!(value["messages"][1].get("content").is_none());
    assert_eq!(value["messages"][1]["tool_calls"][0]["type"], "function");
    assert_eq!(
        value["messages"][1]["tool_calls"][0]["function"]["arguments"],
        "{}"
    );
    assert_eq!(
        value["messages"][2],
        json!({"role": "tool", "tool_call_id": "call_1", "content": "12:00"})
    );
    assert_eq!(
        value["tools"][0],
        json!({
            "type": "function",
            "function": {
                "name": "clock",
                "description": "Current time",
                "parameters": {"type": "object"}
            }
        })
    );
    assert!(value.get("temperature").is_none());
}

#[test]
fn tools_key_is_absent_without_tools() {
    let request = ModelRequest::new("gpt-4o", vec![Message::new(Role::User, "hi")]);
    let body = build_api_request(
        provider()
            .to_openai_request(request)
            .expect("request should convert"),
    )
    .expect("request should build");
    let value = serde_json::to_value(&body).expect("request should serialize");

    assert!(value.get("tools").is_none());
}

#[test]
fn blank_user_text_and_bad_schema_are_rejected() {
    let blank = ModelRequest::new("gpt-4o", vec![Message::new(Role::User, "  ")]);
    let error = build_api_request(provider().to_openai_request(blank).expect("converts"))
        .expect_err("blank text must fail");
    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);

    let broken = ModelRequest::new("gpt-4o", vec![Message::new(Role::User, "hi")]).with_tools(
        vec![ToolDefinition {
            name: "broken".to_string(),
            description: "Bad schema".to_string(),
            input_schema: "{not json".to_string(),
        }],
    );
    let error = build_api_request(provider().to_openai_request(broken).expect("converts"))
        .expect_err("schema must be JSON");
    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
    assert!(error.message.contains("broken"));
}

#[test]
fn finish_reasons_map_to_stop_reasons() {
    let cases = [
        (Some("stop"), StopReason::EndTurn),
        (Some("length"), StopReason::MaxTokens),
        (Some("tool_calls"), StopReason::ToolUse),
        (Some("function_call"), StopReason::ToolUse),
        (Some("content_filter"), StopReason::Cancelled),
        (Some("something_new"), StopReason::Other),
        (None, StopReason::Other),
    ];

    for (raw, expected) in cases {
        assert_eq!(StopReason::from(parse_finish_reason(raw)), expected);
    }
    assert_eq!(parse_finish_reason(Some("stop")), OpenAiFinishReason::Stop);
}

#[test]
fn token_cap_uses_the_parameter_the_model_family_accepts() {
    assert_eq!(
        OpenAiTokenParameter::for_model("gpt-4o"),
        OpenAiTokenParameter::MaxTokens
    );
    assert_eq!(
        OpenAiTokenParameter::for_model("o3-mini"),
        OpenAiTokenParameter::MaxCompletionTokens
    );
    assert_eq!(
        OpenAiTokenParameter::for_model("GPT-5-mini"),
        OpenAiTokenParameter::MaxCompletionTokens
    );

    let request = OpenAiRequest {
        model: "gpt-4o".to_string(),
        messages: vec![OpenAiMessage::User("hi".to_string())],
        tools: Vec::new(),
        temperature: None,
        max_tokens: Some(256),
    };

    let legacy =
        build_api_request_with_token_parameter(request.clone(), OpenAiTokenParameter::MaxTokens)
            .expect("request should build");
    assert_eq!(
        (legacy.max_tokens, legacy.max_completion_tokens),
        (Some(256), None)
    );

    let modern = build_api_request_with_token_parameter(
        request,
        OpenAiTokenParameter::MaxCompletionTokens,
    )
    .expect("request should build");
    assert_eq!(
        (modern.max_tokens, modern.max_completion_tokens),
        (None, Some(256))
    );
}

#[test]
fn reply_with_tool_calls_maps_into_model_response() {
    let parsed: OpenAiApiResponse = serde_json::from_value(json!({
        "model": "gpt-4o-2024-08-06",
        "choices": [{
            "message": {
                "content": null,
                "tool_calls": [{
                    "id": "call_7",
                    "type": "function",
                    "function": { "name": "clock", "arguments": "{\"tz\":\"UTC\"}" }
                }]
            },
            "finish_reason": "tool_calls"
        }],
        "usage": { "prompt_tokens": 9, "completion_tokens": 4, "total_tokens": 13 }
    }))
    .expect("payload should parse");

    let response = OpenAiResponse::try_from(parsed)
        .expect("response should convert")
        .into_model_response();

    assert_eq!(response.stop_reason, StopReason::ToolUse);
    assert_eq!(response.text(), "");
    assert_eq!(response.tool_calls()[0].name, "clock");
    assert_eq!(response.tool_calls()[0].arguments, "{\"tz\":\"UTC\"}");
    assert_eq!(response.usage.total_tokens, 13);
}

#[test]
fn reply_without_choices_is_a_transport_error() {
    let parsed: OpenAiApiResponse =
        serde_json::from_value(json!({ "model": "gpt-4o", "choices": [] }))
            .expect("payload should parse");

    let error = OpenAiResponse::try_from(parsed).expect_err("missing choices must fail");
    assert_eq!(error.kind, ProviderErrorKind::Transport);
}

#[test]
fn whitespace_assistant_text_is_omitted_next_to_tool_calls() {
    let mut messages = clock_round_trip();
    messages[1] = Message::assistant_tool_calls(
        "\n\n",
        vec![ToolCall {
            id: "call_1".to_string(),
            name: "clock".to_string(),
            arguments: "{}".to_string(),
        }],
    );

    let body = build_api_request(
        provider()
            .to_openai_request(ModelRequest::new("gpt-4o", messages))
            .expect("request should convert"),
    )
    .expect("request should build");
    let value = serde_json::to_value(&body).expect("request should serialize");

    assert!(value["messages"][1].get("content").is_none());
    assert_eq!(value["messages"][1]["tool_calls"][0]["id"], "call_1");
}
