use std::fmt;

use crate::view_model::{AnalysisView, AppViewModel, SearchView};
use crate::{AnalysisState, SearchState};

/// A failed backend call as seen by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    /// HTTP status when the server answered with a non-success code.
    pub status: Option<u16>,
    pub message: String,
}

impl LoadError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP error! status: {status}"),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    search: SearchState,
    analysis: AnalysisState,
    rejected_url: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn analysis(&self) -> &AnalysisState {
        &self.analysis
    }

    pub fn view(&self) -> AppViewModel {
        let search = &self.search;
        AppViewModel {
            search: SearchView {
                query: search.query().to_string(),
                items: search.items().cloned().collect(),
                page_count: search.pages().len(),
                has_next: search.has_next(),
                is_loading: search.is_loading(),
                is_loading_more: search.is_loading_more(),
                error: search.error().map(ToString::to_string),
                rejected_cursor: search.rejected_cursor(),
            },
            analysis: AnalysisView {
                url: self.analysis.url().map(str::to_string),
                is_loading: self.analysis.is_loading(),
                rejected_input: self.rejected_url.clone(),
            },
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn search_mut(&mut self) -> &mut SearchState {
        &mut self.search
    }

    pub(crate) fn analysis_mut(&mut self) -> &mut AnalysisState {
        &mut self.analysis
    }

    pub(crate) fn set_rejected_url(&mut self, input: Option<String>) {
        self.rejected_url = input;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
