use std::time::Duration;

use biaslens_api::{ApiCommand, ApiError, ApiEvent, ApiHandle, WorkerStopped};
use biaslens_core::{Effect, LoadError, Msg};
use lens_logging::{lens_debug, lens_info, lens_trace, lens_warn};

/// Hands reducer effects to the request worker and turns its events back
/// into messages.
pub struct EffectRunner {
    api: ApiHandle,
}

impl EffectRunner {
    pub fn new(api: ApiHandle) -> Self {
        Self { api }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            let command = match effect {
                Effect::FetchSearchPage { query, cursor } => {
                    lens_info!("FetchSearchPage query={:?} cursor={}", query, cursor);
                    ApiCommand::SearchPage { query, cursor }
                }
                Effect::AnalyzeUrl { url } => {
                    lens_info!("AnalyzeUrl url={}", url);
                    ApiCommand::Analyze { url }
                }
                Effect::FactCheck { request } => {
                    lens_info!("FactCheck headline={:?}", request.headline);
                    ApiCommand::FactCheck { request }
                }
            };
            self.api.enqueue(command);
        }
    }

    /// Next worker result as a reducer message, if one arrives within `timeout`.
    pub fn next_msg(&self, timeout: Duration) -> Result<Option<Msg>, WorkerStopped> {
        Ok(self.api.recv_timeout(timeout)?.map(map_event))
    }

    /// Runs one request outside the reducer and waits for its event.
    pub fn call(&self, command: ApiCommand) -> Result<ApiEvent, WorkerStopped> {
        let request_id = self.api.enqueue(command);
        loop {
            match self.api.recv_timeout(Duration::from_millis(250))? {
                Some(event) if event.request_id() == request_id => return Ok(event),
                Some(other) => {
                    lens_debug!("dropping event for request_id={}", other.request_id());
                }
                None => lens_trace!("waiting for request_id={}", request_id),
            }
        }
    }
}

pub fn map_event(event: ApiEvent) -> Msg {
    match event {
        ApiEvent::SearchPage {
            query,
            cursor,
            result,
            ..
        } => match result {
            Ok(page) => Msg::SearchPageLoaded {
                query,
                cursor,
                page,
            },
            Err(err) => {
                lens_warn!("search {:?} cursor={} failed: {}", query, cursor, err);
                Msg::SearchPageFailed {
                    query,
                    cursor,
                    error: load_error(&err),
                }
            }
        },
        ApiEvent::Analyzed { url, result, .. } => match result {
            Ok(result) => Msg::AnalysisLoaded { url, result },
            Err(err) => {
                lens_warn!("analysis of {} failed: {}", url, err);
                Msg::AnalysisFailed {
                    url,
                    error: load_error(&err),
                }
            }
        },
        ApiEvent::FactChecked {
            request, result, ..
        } => match result {
            Ok(result) => Msg::FactCheckLoaded { request, result },
            Err(err) => {
                lens_warn!("fact check for {:?} failed: {}", request.headline, err);
                Msg::FactCheckFailed {
                    request,
                    error: load_error(&err),
                }
            }
        },
        ApiEvent::Extracted { request_id, .. } | ApiEvent::Summarized { request_id, .. } => {
            lens_debug!("request_id={} has no reducer message", request_id);
            Msg::NoOp
        }
    }
}

pub fn load_error(err: &ApiError) -> LoadError {
    LoadError::new(err.status(), err.message.clone())
}
