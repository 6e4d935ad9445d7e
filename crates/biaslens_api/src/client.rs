use futures_util::StreamExt;
use lens_logging::{lens_debug, lens_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use biaslens_core::{
    AnalyzeResult, Cursor, ExtractResult, FactCheckRequest, FactCheckResult, Page,
    SummarizeRequest, SummaryResult,
};

use crate::{ApiConfig, ApiError, ApiErrorKind};

/// The backend endpoints the client consumes.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn search(&self, query: &str, cursor: Cursor) -> Result<Page, ApiError>;

    async fn extract(&self, url: &str) -> Result<ExtractResult, ApiError>;

    async fn analyze_url(&self, url: &str) -> Result<AnalyzeResult, ApiError>;

    async fn summarize(&self, text: &str) -> Result<SummaryResult, ApiError>;

    async fn fact_check(&self, request: &FactCheckRequest) -> Result<FactCheckResult, ApiError>;
}

/// Stateless JSON client bound to one base address. No retries: every
/// failure is returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| ApiError::new(ApiErrorKind::Network, err.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `{base}{path}`, plus a form-urlencoded query string when `params` is
    /// non-empty.
    pub fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.config.base_url(), path);
        let mut url = Url::parse(&raw)
            .map_err(|err| ApiError::new(ApiErrorKind::InvalidUrl, format!("{raw}: {err}")))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path, params)?;
        let http_id = lens_logging::next_http_id();
        lens_debug!("http_id={} GET {}", http_id, url);
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.read_json(http_id, response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path, &[])?;
        let payload = serde_json::to_vec(body)
            .map_err(|err| ApiError::new(ApiErrorKind::Encode, err.to_string()))?;
        let http_id = lens_logging::next_http_id();
        lens_debug!(
            "http_id={} POST {} body_len={}",
            http_id,
            url,
            payload.len()
        );
        let response = self
            .http
            .post(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.read_json(http_id, response).await
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        http_id: u64,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            lens_warn!("http_id={} failed with status {}", http_id, status);
            return Err(ApiError::new(
                ApiErrorKind::HttpStatus(status.as_u16()),
                format!("HTTP error! status: {}", status.as_u16()),
            ));
        }

        let max_bytes = self.config.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        lens_debug!(
            "http_id={} status={} bytes={}",
            http_id,
            status.as_u16(),
            bytes.len()
        );

        serde_json::from_slice(&bytes).map_err(|err| {
            lens_warn!("http_id={} undecodable body: {}", http_id, err);
            ApiError::new(ApiErrorKind::Decode, err.to_string())
        })
    }
}

#[async_trait::async_trait]
impl Backend for ApiClient {
    async fn search(&self, query: &str, cursor: Cursor) -> Result<Page, ApiError> {
        let cursor = cursor.to_string();
        self.get("/search", &[("q", query), ("cursor", cursor.as_str())])
            .await
    }

    async fn extract(&self, url: &str) -> Result<ExtractResult, ApiError> {
        self.get("/extract", &[("url", url)]).await
    }

    async fn analyze_url(&self, url: &str) -> Result<AnalyzeResult, ApiError> {
        self.get("/analyze/url", &[("url", url)]).await
    }

    async fn summarize(&self, text: &str) -> Result<SummaryResult, ApiError> {
        let body = SummarizeRequest {
            text: text.to_string(),
        };
        self.post_json("/summarize", &body).await
    }

    async fn fact_check(&self, request: &FactCheckRequest) -> Result<FactCheckResult, ApiError> {
        self.post_json("/factcheck", request).await
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> ApiError {
    ApiError::new(
        ApiErrorKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiErrorKind::Timeout, err.to_string());
    }
    ApiError::new(ApiErrorKind::Network, err.to_string())
}
