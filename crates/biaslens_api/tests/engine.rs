use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use biaslens_api::{
    ApiClient, ApiCommand, ApiConfig, ApiError, ApiErrorKind, ApiEvent, ApiHandle, Backend,
};
use biaslens_core::{
    AnalyzeResult, ArticleStub, Cursor, ExtractResult, FactCheckRequest, FactCheckResult,
    FactCheckStatus, Page, SummaryResult,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves canned search pages and records every call. Summarizing panics.
#[derive(Default)]
struct FakeBackend {
    calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unsupported() -> ApiError {
    ApiError::new(ApiErrorKind::Network, "fake backend does not serve this endpoint")
}

#[async_trait::async_trait]
impl Backend for FakeBackend {
    async fn search(&self, query: &str, cursor: Cursor) -> Result<Page, ApiError> {
        self.record(format!("search {query} {cursor}"));
        Ok(Page::new(
            vec![ArticleStub {
                url: format!("https://news.example.com/{cursor}"),
                source: "Example".to_string(),
                published_at: None,
                title: format!("{query} #{cursor}"),
                extract_status: None,
            }],
            Cursor::new(cursor.get() + 1),
        ))
    }

    async fn extract(&self, _url: &str) -> Result<ExtractResult, ApiError> {
        Err(unsupported())
    }

    async fn analyze_url(&self, _url: &str) -> Result<AnalyzeResult, ApiError> {
        Err(unsupported())
    }

    async fn summarize(&self, text: &str) -> Result<SummaryResult, ApiError> {
        panic!("summarizer crashed on {} chars", text.len());
    }

    async fn fact_check(&self, request: &FactCheckRequest) -> Result<FactCheckResult, ApiError> {
        self.record(format!("factcheck {}", request.headline));
        Ok(FactCheckResult {
            status: FactCheckStatus::None,
            items: Vec::new(),
        })
    }
}

fn wait_for_events(handle: &ApiHandle, count: usize) -> Vec<ApiEvent> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut events = Vec::new();
    while events.len() < count && Instant::now() < deadline {
        if let Some(event) = handle
            .recv_timeout(Duration::from_millis(50))
            .expect("worker running")
        {
            events.push(event);
        }
    }
    events
}

#[test]
fn events_carry_the_command_tag() {
    let backend = Arc::new(FakeBackend::default());
    let handle = ApiHandle::new(backend.clone()).expect("runtime");

    let first = handle.enqueue(ApiCommand::SearchPage {
        query: "housing".to_string(),
        cursor: Cursor::FIRST,
    });
    let second = handle.enqueue(ApiCommand::FactCheck {
        request: FactCheckRequest {
            headline: "Rents rise".to_string(),
            source_domain: None,
            summary: None,
            max_age_months: Some(18),
        },
    });
    assert_ne!(first, second);

    let mut events = wait_for_events(&handle, 2);
    assert_eq!(events.len(), 2);
    events.sort_by_key(ApiEvent::request_id);

    match &events[0] {
        ApiEvent::SearchPage {
            request_id,
            query,
            cursor,
            result,
        } => {
            assert_eq!(*request_id, first);
            assert_eq!(query, "housing");
            assert_eq!(*cursor, Cursor::FIRST);
            let page = result.as_ref().expect("page");
            assert_eq!(page.items[0].title, "housing #1");
            assert_eq!(page.next_cursor, Cursor::new(2));
        }
        other => panic!("unexpected event {other:?}"),
    }
    match &events[1] {
        ApiEvent::FactChecked {
            request_id,
            request,
            result,
        } => {
            assert_eq!(*request_id, second);
            assert_eq!(request.headline, "Rents rise");
            assert_eq!(request.max_age_months, Some(18));
            assert!(result.is_ok());
        }
        other => panic!("unexpected event {other:?}"),
    }

    let mut calls = backend.calls.lock().unwrap().clone();
    calls.sort();
    assert_eq!(calls, vec!["factcheck Rents rise", "search housing 1"]);
}

#[test]
fn failures_are_delivered_as_events() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/analyze/url"))
            .and(query_param("url", "https://news.example.com/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "gone" })))
            .mount(&server),
    );

    let client = ApiClient::new(ApiConfig::new(&server.uri()).unwrap()).unwrap();
    let handle = ApiHandle::new(Arc::new(client)).expect("runtime");
    let id = handle.enqueue(ApiCommand::Analyze {
        url: "https://news.example.com/gone".to_string(),
    });

    let events = wait_for_events(&handle, 1);
    match events.as_slice() {
        [ApiEvent::Analyzed {
            request_id,
            url,
            result: Err(err),
        }] => {
            assert_eq!(*request_id, id);
            assert_eq!(url, "https://news.example.com/gone");
            assert_eq!(err.kind, ApiErrorKind::HttpStatus(404));
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn crashed_request_still_reports_an_event() {
    let handle = ApiHandle::new(Arc::new(FakeBackend::default())).expect("runtime");
    let id = handle.enqueue(ApiCommand::Summarize {
        text: "Some article text.".to_string(),
    });

    let events = wait_for_events(&handle, 1);
    match events.as_slice() {
        [ApiEvent::Summarized {
            request_id,
            result: Err(err),
        }] => {
            assert_eq!(*request_id, id);
            assert_eq!(err.kind, ApiErrorKind::Worker);
            assert_eq!(err.status(), None);
        }
        other => panic!("unexpected events {other:?}"),
    }

    // The worker keeps serving after a crashed request.
    handle.enqueue(ApiCommand::SearchPage {
        query: "housing".to_string(),
        cursor: Cursor::FIRST,
    });
    let events = wait_for_events(&handle, 1);
    assert!(matches!(
        events.as_slice(),
        [ApiEvent::SearchPage { result: Ok(_), .. }]
    ));
}

#[test]
fn try_recv_does_not_block() {
    let handle = ApiHandle::new(Arc::new(FakeBackend::default())).expect("runtime");
    assert_eq!(handle.try_recv(), Ok(None));

    let id = handle.enqueue(ApiCommand::SearchPage {
        query: "housing".to_string(),
        cursor: Cursor::FIRST,
    });
    let deadline = Instant::now() + Duration::from_secs(5);
    let event = loop {
        if let Some(event) = handle.try_recv().expect("worker running") {
            break event;
        }
        assert!(Instant::now() < deadline, "no event within 5s");
        std::thread::sleep(Duration::from_millis(10));
    };
    assert_eq!(event.request_id(), id);
    assert_eq!(handle.try_recv(), Ok(None));
}
