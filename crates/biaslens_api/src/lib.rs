//! Bias Lens API: request primitive, typed endpoints and the request worker.
mod client;
mod config;
mod engine;
mod types;

pub use client::{ApiClient, Backend};
pub use config::{ApiConfig, ConfigError};
pub use engine::ApiHandle;
pub use types::{ApiCommand, ApiError, ApiErrorKind, ApiEvent, RequestId, WorkerStopped};
