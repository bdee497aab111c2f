//! Extraction API client tests against a mock server

use automobile::config::ExtractionConfig;
use automobile::{ArticleFetcher, AutomobileError, ReadabilityFetcher, Sanitizer};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates extraction settings pointing at the mock server
fn create_test_config(server: &MockServer) -> ExtractionConfig {
    ExtractionConfig {
        endpoint: format!("{}/api/content/v1/parser", server.uri()),
        token: "secret-token".to_string(),
        timeout_secs: Some(5),
    }
}

fn create_fetcher(server: &MockServer) -> ReadabilityFetcher {
    ReadabilityFetcher::new(&create_test_config(server), Sanitizer::default())
        .expect("Failed to create fetcher")
}

#[tokio::test]
async fn test_fetch_sanitizes_content() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/content/v1/parser"))
        .and(query_param("token", "secret-token"))
        .and(query_param("url", "https://news.example/story?id=7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "  A Long Story \n",
            "content": "\n<div class=\"article\">\n<p>First\tparagraph</p><img src=\"lead.jpg\"><p></p></div>\n",
            "author": "Someone",
            "word_count": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let article = create_fetcher(&server)
        .fetch("https://news.example/story?id=7")
        .await
        .expect("Fetch failed");

    assert_eq!(article.title, "A Long Story");
    assert_eq!(article.html, "<div> <p>First paragraph</p></div>");
}

#[tokio::test]
async fn test_non_200_status_is_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/content/v1/parser"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = create_fetcher(&server)
        .fetch("https://news.example/gone")
        .await;

    match result {
        Err(AutomobileError::Fetch { url, status }) => {
            assert_eq!(url, "https://news.example/gone");
            assert_eq!(status, 404);
        }
        other => panic!("Expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_other_success_status_is_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/content/v1/parser"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let result = create_fetcher(&server).fetch("https://news.example/a").await;
    assert!(matches!(result, Err(AutomobileError::Fetch { status: 204, .. })));
}

#[tokio::test]
async fn test_malformed_json_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = create_fetcher(&server).fetch("https://news.example/a").await;
    assert!(matches!(result, Err(AutomobileError::InvalidResponse { .. })));
}

#[tokio::test]
async fn test_missing_content_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "Only a title" })))
        .mount(&server)
        .await;

    let result = create_fetcher(&server).fetch("https://news.example/a").await;
    assert!(matches!(result, Err(AutomobileError::InvalidResponse { .. })));
}

#[tokio::test]
async fn test_blank_title_falls_back_to_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "   ",
            "content": "<p>Body</p>"
        })))
        .mount(&server)
        .await;

    let article = create_fetcher(&server)
        .fetch("https://news.example/untitled")
        .await
        .expect("Fetch failed");

    assert_eq!(article.title, "https://news.example/untitled");
    assert_eq!(article.html, "<p>Body</p>");
}

#[tokio::test]
async fn test_non_ascii_content_is_encoding_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Caf\u{e9}",
            "content": "<p>It\u{2019}s here</p>"
        })))
        .mount(&server)
        .await;

    let result = create_fetcher(&server).fetch("https://news.example/a").await;

    match result {
        Err(AutomobileError::Encoding(err)) => assert_eq!(err.character, '\u{2019}'),
        other => panic!("Expected encoding error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_ascii_escaped_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Quotes",
            "content": "<p>It\u{2019}s here</p>"
        })))
        .mount(&server)
        .await;

    let sanitizer = Sanitizer {
        escape_non_ascii: true,
    };
    let fetcher = ReadabilityFetcher::new(&create_test_config(&server), sanitizer)
        .expect("Failed to create fetcher");
    let article = fetcher.fetch("https://news.example/a").await.expect("Fetch failed");

    assert_eq!(article.html, "<p>It&#8217;s here</p>");
}

#[tokio::test]
async fn test_missing_token_rejected_before_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = ExtractionConfig {
        token: String::new(),
        ..create_test_config(&server)
    };
    let fetcher =
        ReadabilityFetcher::new(&config, Sanitizer::default()).expect("Failed to create fetcher");
    let result = fetcher.fetch("https://news.example/a").await;

    assert!(matches!(result, Err(AutomobileError::Config(_))));
}
