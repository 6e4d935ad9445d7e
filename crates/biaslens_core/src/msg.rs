use crate::{AnalyzeResult, Cursor, FactCheckRequest, FactCheckResult, LoadError, Page};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the search box.
    QueryChanged(String),
    /// User asked for the next page of results.
    LoadMoreClicked,
    /// User asked to repeat the fetch that last failed.
    RetryClicked,
    /// A search page arrived for the tagged request.
    SearchPageLoaded {
        query: String,
        cursor: Cursor,
        page: Page,
    },
    /// A search page request failed.
    SearchPageFailed {
        query: String,
        cursor: Cursor,
        error: LoadError,
    },
    /// User submitted an article URL for analysis.
    UrlSubmitted(String),
    AnalysisLoaded {
        url: String,
        result: AnalyzeResult,
    },
    AnalysisFailed {
        url: String,
        error: LoadError,
    },
    /// A fact check finished; tagged with the exact request that was sent.
    FactCheckLoaded {
        request: FactCheckRequest,
        result: FactCheckResult,
    },
    FactCheckFailed {
        request: FactCheckRequest,
        error: LoadError,
    },
    /// A worker result with no reducer state behind it (one-shot extract or
    /// summarize calls).
    NoOp,
}
