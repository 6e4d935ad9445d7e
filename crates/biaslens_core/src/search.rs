//! Paginated search accumulator.
//!
//! One tagged [`SearchPhase`] holds the current query and every page received
//! for it. Fetches are tagged with the `(query, cursor)` pair they were issued
//! for; results whose tag no longer matches the phase are dropped on arrival.

use std::collections::BTreeSet;
use std::mem;

use crate::rules::is_query_eligible;
use crate::{ArticleStub, Cursor, Effect, LoadError, Page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPhase {
    /// No eligible query. `query` is the raw text, possibly empty.
    Idle { query: String },
    Loading { query: String },
    Loaded { query: String, pages: Vec<Page> },
    LoadingMore {
        query: String,
        pages: Vec<Page>,
        cursor: Cursor,
    },
    Errored {
        query: String,
        pages: Vec<Page>,
        error: LoadError,
    },
}

impl Default for SearchPhase {
    fn default() -> Self {
        SearchPhase::Idle {
            query: String::new(),
        }
    }
}

impl SearchPhase {
    pub fn query(&self) -> &str {
        match self {
            SearchPhase::Idle { query }
            | SearchPhase::Loading { query }
            | SearchPhase::Loaded { query, .. }
            | SearchPhase::LoadingMore { query, .. }
            | SearchPhase::Errored { query, .. } => query,
        }
    }

    pub fn pages(&self) -> &[Page] {
        match self {
            SearchPhase::Idle { .. } | SearchPhase::Loading { .. } => &[],
            SearchPhase::Loaded { pages, .. }
            | SearchPhase::LoadingMore { pages, .. }
            | SearchPhase::Errored { pages, .. } => pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    phase: SearchPhase,
    in_flight: BTreeSet<(String, Cursor)>,
    rejected_cursor: Option<Cursor>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn query(&self) -> &str {
        self.phase.query()
    }

    pub fn pages(&self) -> &[Page] {
        self.phase.pages()
    }

    /// All items of all pages, in arrival order.
    pub fn items(&self) -> impl Iterator<Item = &ArticleStub> + '_ {
        self.pages().iter().flat_map(|page| page.items.iter())
    }

    /// Next-cursor of the most recent page.
    pub fn next_cursor(&self) -> Option<Cursor> {
        self.pages().last().and_then(|page| page.next_cursor)
    }

    pub fn has_next(&self) -> bool {
        self.next_cursor().is_some()
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            SearchPhase::Loading { .. } | SearchPhase::LoadingMore { .. }
        )
    }

    /// True only while a continuation page (cursor beyond the first) is in flight.
    pub fn is_loading_more(&self) -> bool {
        matches!(self.phase, SearchPhase::LoadingMore { .. })
    }

    pub fn error(&self) -> Option<&LoadError> {
        match &self.phase {
            SearchPhase::Errored { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Last next-cursor dropped because it did not advance past the cursor
    /// it was returned for.
    pub fn rejected_cursor(&self) -> Option<Cursor> {
        self.rejected_cursor
    }

    pub fn is_in_flight(&self, query: &str, cursor: Cursor) -> bool {
        self.in_flight.contains(&(query.to_string(), cursor))
    }

    pub(crate) fn set_query(&mut self, query: String) -> Option<Effect> {
        if query == self.query() {
            return None;
        }
        self.rejected_cursor = None;
        if !is_query_eligible(&query) {
            self.phase = SearchPhase::Idle { query };
            return None;
        }
        self.phase = SearchPhase::Loading {
            query: query.clone(),
        };
        self.request(query, Cursor::FIRST)
    }

    pub(crate) fn load_more(&mut self) -> Option<Effect> {
        let cursor = self.next_cursor()?;
        match mem::take(&mut self.phase) {
            SearchPhase::Loaded { query, pages } | SearchPhase::Errored { query, pages, .. } => {
                self.phase = SearchPhase::LoadingMore {
                    query: query.clone(),
                    pages,
                    cursor,
                };
                self.request(query, cursor)
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Re-issues the fetch that last failed. A failed first page is fetched
    /// again from the start; a failed continuation behaves like `load_more`.
    pub(crate) fn retry(&mut self) -> Option<Effect> {
        match &self.phase {
            SearchPhase::Errored { query, pages, .. } if pages.is_empty() => {
                let query = query.clone();
                self.phase = SearchPhase::Loading {
                    query: query.clone(),
                };
                self.request(query, Cursor::FIRST)
            }
            SearchPhase::Errored { .. } => self.load_more(),
            _ => None,
        }
    }

    /// Applies a fetched page. Returns false when the page was stale.
    pub(crate) fn accept_page(&mut self, query: &str, cursor: Cursor, mut page: Page) -> bool {
        self.in_flight.remove(&(query.to_string(), cursor));
        if !self.awaits(query, cursor) {
            return false;
        }

        if let Some(next) = page.next_cursor {
            if next <= cursor {
                page.next_cursor = None;
                self.rejected_cursor = Some(next);
            }
        }

        self.phase = match mem::take(&mut self.phase) {
            SearchPhase::Loading { query } => SearchPhase::Loaded {
                query,
                pages: vec![page],
            },
            SearchPhase::LoadingMore {
                query, mut pages, ..
            } => {
                pages.push(page);
                SearchPhase::Loaded { query, pages }
            }
            other => other,
        };
        true
    }

    /// Records a failed fetch. Pages already held stay visible. Returns false
    /// when the failure belonged to a superseded request.
    pub(crate) fn fail_page(&mut self, query: &str, cursor: Cursor, error: LoadError) -> bool {
        self.in_flight.remove(&(query.to_string(), cursor));
        if !self.awaits(query, cursor) {
            return false;
        }

        self.phase = match mem::take(&mut self.phase) {
            SearchPhase::Loading { query } => SearchPhase::Errored {
                query,
                pages: Vec::new(),
                error,
            },
            SearchPhase::LoadingMore { query, pages, .. } => {
                SearchPhase::Errored { query, pages, error }
            }
            other => other,
        };
        true
    }

    fn awaits(&self, query: &str, cursor: Cursor) -> bool {
        match &self.phase {
            SearchPhase::Loading { query: current } => current == query && cursor.is_first(),
            SearchPhase::LoadingMore {
                query: current,
                cursor: pending,
                ..
            } => current == query && *pending == cursor,
            _ => false,
        }
    }

    fn request(&mut self, query: String, cursor: Cursor) -> Option<Effect> {
        let tag = (query, cursor);
        if self.in_flight.contains(&tag) {
            // The outstanding fetch already carries this tag and will be accepted.
            return None;
        }
        let (query, cursor) = tag.clone();
        self.in_flight.insert(tag);
        Some(Effect::FetchSearchPage { query, cursor })
    }
}
