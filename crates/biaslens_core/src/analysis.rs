//! URL analysis flow: analyze the article, then fact-check its headline.

use crate::rules::{default_fact_check_max_age, is_fact_check_eligible};
use crate::text::source_domain;
use crate::{AnalyzeResult, Effect, FactCheckRequest, FactCheckResult, LoadError};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnalysisState {
    #[default]
    Empty,
    Analyzing { url: String },
    Analyzed {
        url: String,
        result: Box<AnalyzeResult>,
        fact_check: FactCheckState,
    },
    Failed { url: String, error: LoadError },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FactCheckState {
    /// The article has no usable headline.
    #[default]
    NotRequested,
    Checking { request: FactCheckRequest },
    Checked {
        headline: String,
        result: FactCheckResult,
    },
    Failed { headline: String, error: LoadError },
}

impl AnalysisState {
    pub fn url(&self) -> Option<&str> {
        match self {
            AnalysisState::Analyzing { url }
            | AnalysisState::Analyzed { url, .. }
            | AnalysisState::Failed { url, .. } => Some(url),
            AnalysisState::Empty => None,
        }
    }

    pub fn result(&self) -> Option<&AnalyzeResult> {
        match self {
            AnalysisState::Analyzed { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn fact_check(&self) -> Option<&FactCheckState> {
        match self {
            AnalysisState::Analyzed { fact_check, .. } => Some(fact_check),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            AnalysisState::Analyzing { .. }
                | AnalysisState::Analyzed {
                    fact_check: FactCheckState::Checking { .. },
                    ..
                }
        )
    }

    /// Starts analyzing `url`. The caller has already checked eligibility.
    pub(crate) fn submit(&mut self, url: String) -> Option<Effect> {
        if matches!(self, AnalysisState::Analyzing { url: pending } if *pending == url) {
            return None;
        }
        *self = AnalysisState::Analyzing { url: url.clone() };
        Some(Effect::AnalyzeUrl { url })
    }

    pub(crate) fn accept(&mut self, url: &str, result: AnalyzeResult) -> Option<Effect> {
        if !self.awaits(url) {
            return None;
        }
        let request = fact_check_request(url, &result);
        let effect = request.clone().map(|request| Effect::FactCheck { request });
        let fact_check = match request {
            Some(request) => FactCheckState::Checking { request },
            None => FactCheckState::NotRequested,
        };
        *self = AnalysisState::Analyzed {
            url: url.to_string(),
            result: Box::new(result),
            fact_check,
        };
        effect
    }

    pub(crate) fn fail(&mut self, url: &str, error: LoadError) -> bool {
        if !self.awaits(url) {
            return false;
        }
        *self = AnalysisState::Failed {
            url: url.to_string(),
            error,
        };
        true
    }

    pub(crate) fn accept_fact_check(
        &mut self,
        request: &FactCheckRequest,
        result: FactCheckResult,
    ) -> bool {
        self.resolve_fact_check(request, |headline| FactCheckState::Checked {
            headline,
            result,
        })
    }

    pub(crate) fn fail_fact_check(&mut self, request: &FactCheckRequest, error: LoadError) -> bool {
        self.resolve_fact_check(request, |headline| FactCheckState::Failed { headline, error })
    }

    /// Applies a fact-check outcome only if it answers the pending request
    /// exactly.
    fn resolve_fact_check(
        &mut self,
        request: &FactCheckRequest,
        next: impl FnOnce(String) -> FactCheckState,
    ) -> bool {
        if let AnalysisState::Analyzed { fact_check, .. } = self {
            if let FactCheckState::Checking { request: pending } = fact_check {
                if pending == request {
                    *fact_check = next(request.headline.clone());
                    return true;
                }
            }
        }
        false
    }

    fn awaits(&self, url: &str) -> bool {
        matches!(self, AnalysisState::Analyzing { url: pending } if pending == url)
    }
}

fn fact_check_request(url: &str, result: &AnalyzeResult) -> Option<FactCheckRequest> {
    let headline = result.extract.headline.as_deref()?.trim();
    if !is_fact_check_eligible(headline) {
        return None;
    }
    let summary = result
        .summary
        .as_ref()
        .map(|summary| summary.joined.trim())
        .filter(|joined| !joined.is_empty())
        .map(str::to_string);
    let domain = source_domain(&result.extract.url).or_else(|| source_domain(url));
    Some(FactCheckRequest {
        headline: headline.to_string(),
        source_domain: domain,
        summary,
        max_age_months: Some(default_fact_check_max_age(headline)),
    })
}
