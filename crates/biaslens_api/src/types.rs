use std::fmt;

use biaslens_core::{AnalyzeResult, Cursor, ExtractResult, FactCheckRequest, FactCheckResult, Page, SummaryResult};

/// Tag carried by every worker command and echoed in its event.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// HTTP status when the server answered with a non-success code.
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            ApiErrorKind::HttpStatus(code) => Some(code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Encode,
    Network,
    /// The request task ended without producing an outcome.
    Worker,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::InvalidUrl => write!(f, "invalid url"),
            ApiErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            ApiErrorKind::Decode => write!(f, "malformed response"),
            ApiErrorKind::Encode => write!(f, "request body could not be encoded"),
            ApiErrorKind::Network => write!(f, "network error"),
            ApiErrorKind::Worker => write!(f, "request task failed"),
        }
    }
}

/// The worker thread is gone; no further events will arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("request worker stopped")]
pub struct WorkerStopped;

/// Work accepted by [`crate::ApiHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    SearchPage { query: String, cursor: Cursor },
    Analyze { url: String },
    Extract { url: String },
    Summarize { text: String },
    FactCheck { request: FactCheckRequest },
}

/// Outcome of one [`ApiCommand`], tagged with what was asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    SearchPage {
        request_id: RequestId,
        query: String,
        cursor: Cursor,
        result: Result<Page, ApiError>,
    },
    Analyzed {
        request_id: RequestId,
        url: String,
        result: Result<AnalyzeResult, ApiError>,
    },
    Extracted {
        request_id: RequestId,
        url: String,
        result: Result<ExtractResult, ApiError>,
    },
    Summarized {
        request_id: RequestId,
        result: Result<SummaryResult, ApiError>,
    },
    FactChecked {
        request_id: RequestId,
        request: FactCheckRequest,
        result: Result<FactCheckResult, ApiError>,
    },
}

impl ApiEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            ApiEvent::SearchPage { request_id, .. }
            | ApiEvent::Analyzed { request_id, .. }
            | ApiEvent::Extracted { request_id, .. }
            | ApiEvent::Summarized { request_id, .. }
            | ApiEvent::FactChecked { request_id, .. } => *request_id,
        }
    }
}

impl ApiCommand {
    /// The event reporting `error` as this command's outcome.
    pub(crate) fn failed(self, request_id: RequestId, error: ApiError) -> ApiEvent {
        match self {
            ApiCommand::SearchPage { query, cursor } => ApiEvent::SearchPage {
                request_id,
                query,
                cursor,
                result: Err(error),
            },
            ApiCommand::Analyze { url } => ApiEvent::Analyzed {
                request_id,
                url,
                result: Err(error),
            },
            ApiCommand::Extract { url } => ApiEvent::Extracted {
                request_id,
                url,
                result: Err(error),
            },
            ApiCommand::Summarize { .. } => ApiEvent::Summarized {
                request_id,
                result: Err(error),
            },
            ApiCommand::FactCheck { request } => ApiEvent::FactChecked {
                request_id,
                request,
                result: Err(error),
            },
        }
    }
}
