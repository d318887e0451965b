use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use promptsmith::config::ProviderHttpConfig;
use promptsmith::error::PromptsmithError;
use promptsmith::models::{OutputFormat, Provider};
use promptsmith::providers::ProviderClient;

fn client_for(server: &MockServer) -> ProviderClient {
    ProviderClient::new(&ProviderHttpConfig {
        timeout_secs: 5,
        base_url_override: Some(server.uri()),
    })
    .expect("client")
}

fn chat_completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn openai_sends_bearer_auth_and_extracts_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "gpt-3.5-turbo" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body("hello")))
        .expect(1)
        .mount(&server)
        .await;

    let output = client_for(&server)
        .execute(Provider::OpenAi, "sk-test", "hi", OutputFormat::Plain)
        .await
        .expect("execute");
    assert_eq!(output, "hello");
}

#[tokio::test]
async fn prompt_carries_format_instruction() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "user", "content": "hi\n\nPlease respond in JSON format." }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body("{}")))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .execute(Provider::OpenAi, "sk-test", "hi", OutputFormat::Json)
        .await
        .expect("execute");
}

#[tokio::test]
async fn gemini_authenticates_via_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .and(query_param("key", "gemini-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "from gemini" } ] } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = client_for(&server)
        .execute(Provider::Gemini, "gemini-key", "hi", OutputFormat::Plain)
        .await
        .expect("execute");
    assert_eq!(output, "from gemini");
}

#[tokio::test]
async fn anthropic_sends_api_key_and_version_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({ "max_tokens": 1000 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [ { "text": "from claude" } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = client_for(&server)
        .execute(Provider::Anthropic, "sk-ant-test", "hi", OutputFormat::Plain)
        .await
        .expect("execute");
    assert_eq!(output, "from claude");
}

#[tokio::test]
async fn groq_uses_openai_compatible_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(body_partial_json(json!({ "model": "mixtral-8x7b-32768" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body("fast")))
        .expect(1)
        .mount(&server)
        .await;

    let output = client_for(&server)
        .execute(Provider::Groq, "gsk_test", "hi", OutputFormat::Plain)
        .await
        .expect("execute");
    assert_eq!(output, "fast");
}

#[tokio::test]
async fn unauthorized_maps_to_invalid_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "bad key" }
        })))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .execute(Provider::OpenAi, "sk-wrong", "hi", OutputFormat::Plain)
        .await
        .expect_err("should fail");

    match error {
        PromptsmithError::Provider { provider, message } => {
            assert_eq!(provider, "openai");
            assert_eq!(message, "Invalid API key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_maps_to_provider_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .execute(Provider::Together, "tok", "hi", OutputFormat::Plain)
        .await
        .expect_err("should fail");

    match error {
        PromptsmithError::Provider { message, .. } => {
            assert!(message.contains("503"), "got: {message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_expected_field_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let output = client_for(&server)
        .execute(Provider::OpenAi, "sk-test", "hi", OutputFormat::Plain)
        .await
        .expect("execute");
    assert_eq!(output, "No response received");
}

#[tokio::test]
async fn empty_api_key_is_rejected_before_any_request() {
    let server = MockServer::start().await;

    let error = client_for(&server)
        .execute(Provider::OpenAi, "", "hi", OutputFormat::Plain)
        .await
        .expect_err("should fail");
    assert!(matches!(error, PromptsmithError::MissingApiKey { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_connection_reports_success_and_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body("pong")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.test_connection(Provider::OpenAi, "sk-test").await);

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    assert!(!client.test_connection(Provider::OpenAi, "sk-wrong").await);
}
