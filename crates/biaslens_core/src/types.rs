//! Records exchanged with the analysis backend.
//!
//! Field names follow the backend's camelCase JSON. Optional fields default
//! to `None` when the server omits them.

use serde::{Deserialize, Serialize};

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStub {
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub published_at: Option<String>,
    pub title: String,
    #[serde(default)]
    pub extract_status: Option<ExtractStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractStatus {
    Api,
    Extracted,
    Missing,
    Error,
}

/// Article metadata and body pulled from a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResult {
    pub url: String,
    #[serde(default)]
    pub headline: Option<String>,
    pub source: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub word_count: u32,
    pub extract_status: ExtractStatus,
    #[serde(default)]
    pub paywalled: Option<bool>,
}

/// Lead-sentence summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub sentences: Vec<String>,
    pub joined: String,
    pub char_count: usize,
    pub word_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BiasLabel {
    Left,
    #[default]
    Neutral,
    Right,
}

/// Bias estimate. `score` runs from -1 (left) to 1 (right).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiasResult {
    pub label: BiasLabel,
    pub score: f64,
    pub confidence: f64,
}

impl BiasResult {
    /// Position of the score on a 0..=100 left-to-right meter.
    pub fn meter_percent(&self) -> f64 {
        let score = if self.score.is_finite() {
            self.score.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        (score + 1.0) / 2.0 * 100.0
    }
}

/// Extraction, summary and bias bundled by `/analyze/url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    #[serde(default)]
    pub id: Option<String>,
    pub extract: ExtractResult,
    #[serde(default)]
    pub summary: Option<SummaryResult>,
    #[serde(default)]
    pub bias: Option<BiasResult>,
}

/// Body of `POST /summarize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

/// Body of `POST /factcheck`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactCheckRequest {
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age_months: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactCheckItem {
    pub claim: String,
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub match_reason: Option<String>,
    #[serde(default)]
    pub similarity_percentage: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactCheckStatus {
    Found,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckResult {
    pub status: FactCheckStatus,
    #[serde(default)]
    pub items: Vec<FactCheckItem>,
}
