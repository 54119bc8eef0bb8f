//! Integration tests for `AnthropicClient` using wiremock HTTP mocks.

use pmtn_feed::{AnthropicClient, FeedError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> AnthropicClient {
    AnthropicClient::with_base_url("test-key", 30, "pmtn-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn messages_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "msg-test",
        "content": [ { "type": "text", "text": text } ]
    })
}

#[tokio::test]
async fn search_news_parses_items_from_message() {
    let server = MockServer::start().await;

    let text = r#"[{"title": "Typhoon disrupts mobile networks", "summary": "Outages across the region.", "url": "https://example.com/typhoon", "source": "Example Wire", "date": "2025-11-22", "country": "Japan"}]"#;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(messages_body(text)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let items = client
        .search_news("PUBG Mobile Japan", &["Japan".to_string()])
        .await
        .expect("should parse message");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Typhoon disrupts mobile networks");
    assert_eq!(items[0].country.as_deref(), Some("Japan"));
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search_news("PUBG Mobile", &[]).await.unwrap_err();

    match err {
        FeedError::Api { status, .. } => assert_eq!(status, 529),
        other => panic!("expected Api error, got: {other}"),
    }
}

#[tokio::test]
async fn message_without_json_array_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(messages_body("no recent news found")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search_news("PUBG Mobile", &[]).await.unwrap_err();
    assert!(matches!(err, FeedError::MalformedResponse(_)));
}
