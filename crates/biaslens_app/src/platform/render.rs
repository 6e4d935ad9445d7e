//! Plain-text rendering of view models and API records.

use std::fmt::Write;

use biaslens_core::text::{format_date, preview_text, source_domain, DEFAULT_PREVIEW_CHARS};
use biaslens_core::verdict::{
    match_reason_label, verdict_guidance, FACT_CHECK_EMPTY_TEXT, FACT_CHECK_FOOTER,
};
use biaslens_core::{
    build_analyze_link, AnalysisState, AnalyzeResult, ArticleStub, BiasLabel, BiasResult,
    ExtractResult, FactCheckItem, FactCheckResult, FactCheckState, FactCheckStatus, Route,
    SearchView, SummaryResult,
};

const METER_WIDTH: usize = 20;

pub fn search_results(view: &SearchView) -> String {
    let mut out = String::new();
    if view.query.trim().is_empty() {
        return out;
    }
    let _ = writeln!(
        out,
        "Results for {:?} ({} {}, {} {})",
        view.query,
        view.items.len(),
        plural(view.items.len(), "article", "articles"),
        view.page_count,
        plural(view.page_count, "page", "pages"),
    );
    for (index, item) in view.items.iter().enumerate() {
        out.push_str(&article_line(index + 1, item));
    }

    if view.is_loading_more {
        out.push_str("Loading more...\n");
    } else if view.is_loading {
        out.push_str("Searching...\n");
    } else if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {error}");
    } else if view.has_next {
        out.push_str("More results available.\n");
    } else if view.items.is_empty() {
        out.push_str("No articles found.\n");
    } else {
        out.push_str("End of results.\n");
    }
    out
}

fn article_line(number: usize, item: &ArticleStub) -> String {
    let mut meta = vec![item.source.clone()];
    if let Some(date) = item.published_at.as_deref().and_then(format_date) {
        meta.push(date);
    }
    if let Some(domain) = source_domain(&item.url) {
        meta.push(domain);
    }
    format!(
        "{number:>3}. {}\n     {}\n     {}\n",
        item.title,
        meta.join(" | "),
        item.url
    )
}

pub fn analysis(state: &AnalysisState) -> String {
    match state {
        AnalysisState::Empty => String::new(),
        AnalysisState::Analyzing { url } => format!("Analyzing {url}...\n"),
        AnalysisState::Failed { url, error } => format!("Analysis of {url} failed: {error}\n"),
        AnalysisState::Analyzed {
            url,
            result,
            fact_check,
        } => {
            let mut out = analyzed(url, result);
            out.push('\n');
            out.push_str(&fact_check_state(fact_check));
            out
        }
    }
}

fn analyzed(url: &str, result: &AnalyzeResult) -> String {
    let mut out = extract(&result.extract);
    if let Some(id) = &result.id {
        let _ = writeln!(out, "Link: {}", build_analyze_link(id, url));
    }
    if let Some(bias) = &result.bias {
        out.push('\n');
        out.push_str(&bias_section(bias));
    }
    if let Some(summary) = &result.summary {
        out.push('\n');
        out.push_str(&summary_section(summary));
    }
    out
}

pub fn extract(result: &ExtractResult) -> String {
    let mut out = String::new();
    let headline = result
        .headline
        .as_deref()
        .filter(|headline| !headline.trim().is_empty())
        .unwrap_or("Untitled article");
    let _ = writeln!(out, "{headline}");

    let mut meta = vec![result.source.clone()];
    if let Some(author) = result.author.as_deref().filter(|a| !a.trim().is_empty()) {
        meta.push(format!("by {author}"));
    }
    if let Some(date) = result.published_at.as_deref().and_then(format_date) {
        meta.push(date);
    }
    let _ = writeln!(out, "{}", meta.join(" | "));
    let _ = writeln!(out, "{}", result.url);
    let _ = writeln!(
        out,
        "{} words, extraction: {:?}{}",
        result.word_count,
        result.extract_status,
        if result.paywalled == Some(true) {
            ", paywalled"
        } else {
            ""
        }
    );
    if let Some(body) = result.body.as_deref().filter(|b| !b.trim().is_empty()) {
        out.push('\n');
        let _ = writeln!(out, "{}", preview_text(body, DEFAULT_PREVIEW_CHARS));
    }
    out
}

fn bias_section(bias: &BiasResult) -> String {
    let label = match bias.label {
        BiasLabel::Left => "Left",
        BiasLabel::Neutral => "Neutral",
        BiasLabel::Right => "Right",
    };
    format!(
        "Bias: {label} (score {:+.2}, confidence {:.0}%)\n{}\n",
        bias.score,
        bias.confidence.clamp(0.0, 1.0) * 100.0,
        bias_meter(bias)
    )
}

/// A fixed-width left-to-right bar with `|` at the score position.
pub fn bias_meter(bias: &BiasResult) -> String {
    let position = (bias.meter_percent() / 100.0 * METER_WIDTH as f64).round() as usize;
    let bar: String = (0..=METER_WIDTH)
        .map(|slot| if slot == position { '|' } else { '-' })
        .collect();
    format!("Left [{bar}] Right")
}

pub fn summary_section(summary: &SummaryResult) -> String {
    let mut out = String::from("Summary:\n");
    if summary.sentences.is_empty() {
        let _ = writeln!(out, "  {}", summary.joined);
    }
    for sentence in &summary.sentences {
        let _ = writeln!(out, "  - {sentence}");
    }
    out
}

fn fact_check_state(state: &FactCheckState) -> String {
    match state {
        FactCheckState::NotRequested => "Fact checks: no headline to check.\n".to_string(),
        FactCheckState::Checking { request } => {
            format!("Checking facts for {:?}...\n", request.headline)
        }
        FactCheckState::Failed { error, .. } => format!("Fact checks unavailable: {error}\n"),
        FactCheckState::Checked { result, .. } => fact_checks(result),
    }
}

pub fn fact_checks(result: &FactCheckResult) -> String {
    let mut out = String::from("Fact checks:\n");
    if result.status == FactCheckStatus::None || result.items.is_empty() {
        let _ = writeln!(out, "  {FACT_CHECK_EMPTY_TEXT}");
        return out;
    }
    for item in &result.items {
        out.push_str(&fact_check_item(item));
    }
    let _ = writeln!(out, "  {FACT_CHECK_FOOTER}");
    out
}

fn fact_check_item(item: &FactCheckItem) -> String {
    let mut out = String::new();
    let verdict = item.verdict.as_deref().unwrap_or("Unrated");
    let _ = writeln!(out, "  [{verdict}] {}", item.claim);
    let _ = writeln!(out, "    {}", verdict_guidance(item.verdict.as_deref()));

    let mut meta = vec![match_reason_label(item.match_reason.as_deref()).to_string()];
    if let Some(percent) = item.similarity_percentage {
        meta.push(format!("{percent:.0}% similar"));
    }
    if let Some(source) = &item.source {
        meta.push(source.clone());
    }
    if let Some(date) = item.published_at.as_deref().and_then(format_date) {
        meta.push(date);
    }
    let _ = writeln!(out, "    {}", meta.join(" | "));
    if let Some(url) = &item.url {
        let _ = writeln!(out, "    {url}");
    }
    out
}

pub fn route(route: &Route) -> String {
    let page = match route {
        Route::Search => "search".to_string(),
        Route::Analyze { url: None } => "analyze (empty form)".to_string(),
        Route::Analyze { url: Some(url) } => format!("analyze {url}"),
        Route::AnalyzeById { id, url: Some(url) } => format!("analysis {id} of {url}"),
        Route::AnalyzeById { id, url: None } => {
            format!("analysis {id} (article URL unknown, cannot load)")
        }
        Route::Recents => "recent analyses".to_string(),
        Route::Settings => "settings".to_string(),
        Route::Details { id } => format!("details for {id}"),
    };
    format!("{route} -> {page}\n")
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}
