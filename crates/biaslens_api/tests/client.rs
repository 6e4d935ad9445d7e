use std::sync::Once;
use std::time::Duration;

use biaslens_api::{ApiClient, ApiConfig, ApiErrorKind, Backend};
use biaslens_core::{BiasLabel, Cursor, ExtractStatus, FactCheckRequest, FactCheckStatus};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(lens_logging::initialize_for_tests);
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig::new(&server.uri()).expect("config")).expect("client")
}

#[tokio::test]
async fn search_sends_query_and_cursor() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "healthcare reform"))
        .and(query_param("cursor", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "url": "https://news.example.com/a",
                    "source": "Example",
                    "publishedAt": "2024-05-01T12:00:00Z",
                    "title": "A",
                    "extractStatus": "api"
                },
                {
                    "url": "https://news.example.com/b",
                    "source": "Example",
                    "title": "B"
                }
            ],
            "nextCursor": "2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .search("healthcare reform", Cursor::FIRST)
        .await
        .expect("search ok");
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].extract_status, Some(ExtractStatus::Api));
    assert_eq!(page.items[1].published_at, None);
    assert_eq!(page.next_cursor, Cursor::new(2));
}

#[tokio::test]
async fn last_page_has_no_cursor() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("cursor", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "items": [], "nextCursor": null })),
        )
        .mount(&server)
        .await;

    let page = client_for(&server)
        .search("healthcare reform", Cursor::new(2).unwrap())
        .await
        .expect("search ok");
    assert!(page.items.is_empty());
    assert_eq!(page.next_cursor, None);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search("election", Cursor::FIRST)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::HttpStatus(500));
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message, "HTTP error! status: 500");
}

#[tokio::test]
async fn malformed_cursor_is_a_decode_error() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "items": [], "nextCursor": "next" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search("election", Cursor::FIRST)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Decode);
}

#[tokio::test]
async fn generic_get_omits_empty_query_string() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(
        client.endpoint("/health", &[]).unwrap().query(),
        None
    );
    let body: serde_json::Value = client.get("/health", &[]).await.expect("get ok");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn analyze_decodes_bundle() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/analyze/url"))
        .and(query_param("url", "https://news.example.com/a?x=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "k3x9qpl2mz",
            "extract": {
                "url": "https://news.example.com/a?x=1",
                "headline": "Senate passes budget",
                "source": "Example",
                "body": "Body text.",
                "wordCount": 2,
                "extractStatus": "extracted"
            },
            "summary": {
                "sentences": ["Body text."],
                "joined": "Body text.",
                "charCount": 10,
                "wordCount": 2
            },
            "bias": { "label": "Left", "score": -0.4, "confidence": 0.7 }
        })))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .analyze_url("https://news.example.com/a?x=1")
        .await
        .expect("analyze ok");
    assert_eq!(result.id.as_deref(), Some("k3x9qpl2mz"));
    assert_eq!(result.extract.headline.as_deref(), Some("Senate passes budget"));
    assert_eq!(result.extract.extract_status, ExtractStatus::Extracted);
    assert_eq!(result.summary.map(|s| s.joined), Some("Body text.".to_string()));
    assert_eq!(result.bias.map(|b| b.label), Some(BiasLabel::Left));
}

#[tokio::test]
async fn extract_uses_url_param() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/extract"))
        .and(query_param("url", "https://news.example.com/b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://news.example.com/b",
            "source": "Example",
            "wordCount": 0,
            "extractStatus": "missing",
            "paywalled": true
        })))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .extract("https://news.example.com/b")
        .await
        .expect("extract ok");
    assert_eq!(result.extract_status, ExtractStatus::Missing);
    assert_eq!(result.paywalled, Some(true));
    assert_eq!(result.body, None);
}

#[tokio::test]
async fn summarize_posts_text() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "text": "First. Second. Third." })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sentences": ["First.", "Second.", "Third."],
            "joined": "First. Second. Third.",
            "charCount": 21,
            "wordCount": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let summary = client_for(&server)
        .summarize("First. Second. Third.")
        .await
        .expect("summarize ok");
    assert_eq!(summary.sentences.len(), 3);
    assert_eq!(summary.word_count, 3);
}

#[tokio::test]
async fn fact_check_posts_camel_case_body() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/factcheck"))
        .and(body_json(json!({
            "headline": "Senate passes budget",
            "sourceDomain": "news.example.com",
            "maxAgeMonths": 18
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "found",
            "items": [{
                "claim": "The Senate passed the budget",
                "verdict": "Mostly True",
                "source": "PolitiFact",
                "url": "https://factcheck.example/1",
                "matchReason": "headline_exact",
                "similarityPercentage": 91.5
            }]
        })))
        .mount(&server)
        .await;

    let request = FactCheckRequest {
        headline: "Senate passes budget".to_string(),
        source_domain: Some("news.example.com".to_string()),
        summary: None,
        max_age_months: Some(18),
    };
    let result = client_for(&server)
        .fact_check(&request)
        .await
        .expect("fact check ok");
    assert_eq!(result.status, FactCheckStatus::Found);
    assert_eq!(result.items[0].verdict.as_deref(), Some("Mostly True"));
    assert_eq!(result.items[0].similarity_percentage, Some(91.5));
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/extract"))
        .respond_with(ResponseTemplate::new(200).set_body_string("0123456789AB"))
        .mount(&server)
        .await;

    let mut config = ApiConfig::new(&server.uri()).unwrap();
    config.max_response_bytes = 10;
    let client = ApiClient::new(config).unwrap();
    let err = client.extract("https://news.example.com/c").await.unwrap_err();
    assert_eq!(
        err.kind,
        ApiErrorKind::TooLarge {
            max_bytes: 10,
            actual: Some(12)
        }
    );
}

#[tokio::test]
async fn request_timeout_is_reported() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "items": [] })),
        )
        .mount(&server)
        .await;

    let mut config = ApiConfig::new(&server.uri()).unwrap();
    config.request_timeout = Some(Duration::from_millis(50));
    let client = ApiClient::new(config).unwrap();
    let err = client.search("slow news", Cursor::FIRST).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Timeout);
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    init_logging();
    // Bind and release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(ApiConfig::new(&format!("http://{addr}")).unwrap()).unwrap();
    let err = client.search("offline", Cursor::FIRST).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Network);
}
