use crate::{ArticleStub, Cursor};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchView {
    pub query: String,
    pub items: Vec<ArticleStub>,
    pub page_count: usize,
    pub has_next: bool,
    pub is_loading: bool,
    pub is_loading_more: bool,
    pub error: Option<String>,
    pub rejected_cursor: Option<Cursor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisView {
    pub url: Option<String>,
    pub is_loading: bool,
    /// Input that was too short to submit.
    pub rejected_input: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub search: SearchView,
    pub analysis: AnalysisView,
    pub dirty: bool,
}
