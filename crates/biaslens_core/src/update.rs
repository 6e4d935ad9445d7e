use crate::rules::is_url_eligible;
use crate::{AnalysisState, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryChanged(query) => {
            if query == state.search().query() {
                return (state, Vec::new());
            }
            let effect = state.search_mut().set_query(query);
            state.mark_dirty();
            effect.into_iter().collect()
        }
        Msg::LoadMoreClicked => {
            let effect = state.search_mut().load_more();
            if effect.is_some() {
                state.mark_dirty();
            }
            effect.into_iter().collect()
        }
        Msg::RetryClicked => {
            let effect = state.search_mut().retry();
            if effect.is_some() {
                state.mark_dirty();
            }
            effect.into_iter().collect()
        }
        Msg::SearchPageLoaded {
            query,
            cursor,
            page,
        } => {
            if state.search_mut().accept_page(&query, cursor, page) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SearchPageFailed {
            query,
            cursor,
            error,
        } => {
            if state.search_mut().fail_page(&query, cursor, error) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UrlSubmitted(input) => {
            if !is_url_eligible(&input) {
                // Keep whatever analysis is showing; only flag the bad input.
                state.set_rejected_url(Some(input));
                state.mark_dirty();
                return (state, Vec::new());
            }
            state.set_rejected_url(None);
            let effect = state.analysis_mut().submit(input.trim().to_string());
            state.mark_dirty();
            effect.into_iter().collect()
        }
        Msg::AnalysisLoaded { url, result } => {
            let was_pending =
                matches!(state.analysis(), AnalysisState::Analyzing { url: pending } if *pending == url);
            let effect = state.analysis_mut().accept(&url, result);
            if was_pending {
                state.mark_dirty();
            }
            effect.into_iter().collect()
        }
        Msg::AnalysisFailed { url, error } => {
            if state.analysis_mut().fail(&url, error) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FactCheckLoaded { request, result } => {
            if state.analysis_mut().accept_fact_check(&request, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FactCheckFailed { request, error } => {
            if state.analysis_mut().fail_fact_check(&request, error) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
