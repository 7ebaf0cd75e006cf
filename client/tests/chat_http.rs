//! Exercises the client over real HTTP against a local mock server.

use std::time::Duration;

use deepseek_client::{
    ChatRequest, Config, DeepSeekClient, DeepSeekError, Message, TransportError,
};
use httpmock::prelude::*;
use serde_json::{Value, json};

fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "created": 1_717_000_000,
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17}
    })
}

fn client_for(server: &MockServer, max_retries: u32) -> DeepSeekClient {
    let config = Config::new("sk-test")
        .with_base_url(server.base_url())
        .with_max_retries(max_retries);
    DeepSeekClient::new(config).unwrap()
}

#[tokio::test]
async fn test_chat_sends_authenticated_request_with_defaults() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-test")
                .header("content-type", "application/json")
                .header("accept", "application/json")
                .json_body_partial(
                    r#"{"model":"deepseek-chat","max_tokens":2048,"temperature":1.0,"top_p":1.0,"web_search":false}"#,
                );
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion_body("Hello from the mock"));
        })
        .await;

    let request = ChatRequest::builder()
        .message(Message::system("You are a helpful assistant"))
        .message(Message::user("Hello"))
        .build();
    let response = client_for(&server, 0).chat(request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.id, "chatcmpl-mock");
    assert_eq!(response.model, "deepseek-chat");
    assert_eq!(response.first_content(), Some("Hello from the mock"));
    assert_eq!(response.usage.prompt_tokens, 12);
    assert_eq!(response.usage.completion_tokens, 5);
    assert_eq!(response.usage.total_tokens, 17);
}

#[tokio::test]
async fn test_error_status_is_reported_once_without_retrying() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401)
                .body(r#"{"error":{"message":"Authentication Fails","type":"authentication_error"}}"#);
        })
        .await;

    let err = client_for(&server, 2)
        .quick_chat("sys", "hi")
        .await
        .unwrap_err();

    mock.assert_hits_async(1).await;
    match err {
        DeepSeekError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Authentication Fails"));
        }
        other => panic!("Expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_embedded_error_in_ok_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({
                "error": {"message": "Model Not Exist", "type": "invalid_request_error"}
            }));
        })
        .await;

    let err = client_for(&server, 0)
        .quick_chat("sys", "hi")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DeepSeekError::Api { ref message, ref error_type }
            if message == "Model Not Exist" && error_type == "invalid_request_error"
    ));
}

#[tokio::test]
async fn test_quick_chat_web_search_sends_flag() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .json_body_partial(r#"{"web_search":true}"#);
            then.status(200).json_body(completion_body("Top 3 AI news"));
        })
        .await;

    let answer = client_for(&server, 0)
        .quick_chat_web_search("You are a helpful assistant", "Latest AI news")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(answer, "Top 3 AI news");
}

#[tokio::test]
async fn test_empty_choices_from_server() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({"id": "x", "choices": []}));
        })
        .await;

    let err = client_for(&server, 0)
        .quick_chat("sys", "hi")
        .await
        .unwrap_err();

    assert!(matches!(err, DeepSeekError::NoChoices));
}

#[tokio::test]
async fn test_unreachable_server_exhausts_attempts() {
    let config = Config::new("sk-test").with_base_url("http://127.0.0.1:1");
    let client = DeepSeekClient::new(config).unwrap();

    let err = client.quick_chat("sys", "hi").await.unwrap_err();

    match err {
        DeepSeekError::MaxRetriesExceeded { attempts, source } => {
            assert_eq!(attempts, 1);
            assert!(matches!(source, TransportError::Request(ref e) if e.is_connect()));
        }
        other => panic!("Expected MaxRetriesExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn test_timeouts_are_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(completion_body("too late"));
        })
        .await;
    let config = Config::new("sk-test")
        .with_base_url(server.base_url())
        .with_max_retries(1)
        .with_timeout_secs(1);
    let client = DeepSeekClient::new(config).unwrap();

    let err = client.quick_chat("sys", "hi").await.unwrap_err();

    mock.assert_hits_async(2).await;
    match err {
        DeepSeekError::MaxRetriesExceeded { attempts, source } => {
            assert_eq!(attempts, 2);
            assert!(matches!(source, TransportError::Request(ref e) if e.is_timeout()));
        }
        other => panic!("Expected MaxRetriesExceeded, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "Requires DEEPSEEK_API_KEY environment variable"]
async fn test_live_quick_chat() {
    let api_key = std::env::var("DEEPSEEK_API_KEY").expect("DEEPSEEK_API_KEY not set");
    let client = DeepSeekClient::new(Config::new(api_key).with_max_retries(3)).unwrap();

    let answer = client
        .quick_chat("You are a helpful assistant", "Say 'Hello from DeepSeek'")
        .await
        .expect("Request failed");
    assert!(!answer.is_empty());
}
