use crate::{Cursor, FactCheckRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one search page; the result comes back tagged with the same pair.
    FetchSearchPage { query: String, cursor: Cursor },
    AnalyzeUrl { url: String },
    FactCheck { request: FactCheckRequest },
}
