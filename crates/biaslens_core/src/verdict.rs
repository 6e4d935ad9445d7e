//! Reader-facing wording for fact-check verdicts and match reasons.

pub const FACT_CHECK_EMPTY_TEXT: &str = "No fact checks were found that closely match this headline. \
Lack of a fact check does not mean the claim is accurate. Consider reading multiple sources.";

pub const FACT_CHECK_FOOTER: &str =
    "Results may address similar claims rather than this exact article.";

const SUPPORTS: &str = "This supports the article's core claim. Still review the source.";
const NEEDS_CONTEXT: &str =
    "Parts are correct but important context may be missing. Read the full check.";
const MISLEADING: &str =
    "Selective framing may lead to a wrong takeaway. Compare details with the article.";
const CONTRADICTS: &str = "This contradicts the claim. Treat the article with caution.";
const NO_EVIDENCE: &str = "No solid evidence found. Be cautious until better sources appear.";
const NOT_FACTUAL: &str = "Not a factual claim. Do not treat as evidence.";
const FALLBACK_ACTION: &str = "Check scope & methodology";
const FALLBACK_REASON: &str = "Similar claim on the same topic";

/// Colour family a verdict is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictTone {
    Supports,
    Contradicts,
    Mixed,
    Misleading,
    Unverified,
    Opinion,
    Satire,
    Unknown,
}

pub fn verdict_tone(verdict: &str) -> VerdictTone {
    let lower = verdict.trim().to_lowercase();
    match lower.as_str() {
        "true" | "mostly true" => VerdictTone::Supports,
        "false" | "mostly false" => VerdictTone::Contradicts,
        "misleading" => VerdictTone::Misleading,
        _ if lower.contains("mixed") || lower.contains("context") => VerdictTone::Mixed,
        _ if lower.contains("unverified") || lower.contains("unsupported") => {
            VerdictTone::Unverified
        }
        _ if lower.contains("opinion") || lower.contains("analysis") => VerdictTone::Opinion,
        _ if lower.contains("satire") || lower.contains("parody") => VerdictTone::Satire,
        _ => VerdictTone::Unknown,
    }
}

/// What the reader should do with a verdict.
pub fn verdict_guidance(verdict: Option<&str>) -> &'static str {
    let Some(verdict) = verdict else {
        return FALLBACK_ACTION;
    };
    match verdict.trim().to_lowercase().as_str() {
        "true" | "mostly true" => SUPPORTS,
        "mixed" | "needs context" => NEEDS_CONTEXT,
        "misleading" => MISLEADING,
        "false" | "mostly false" => CONTRADICTS,
        "unverified" | "unsupported" | "unknown" => NO_EVIDENCE,
        "opinion" | "analysis" | "satire" | "parody" => NOT_FACTUAL,
        _ => FALLBACK_ACTION,
    }
}

/// Why a fact check is shown next to the article. Legacy reason codes map
/// onto the three relatedness buckets.
pub fn match_reason_label(reason: Option<&str>) -> &'static str {
    match reason.unwrap_or_default() {
        "highly_related" | "headline_exact" | "summary_claim_exact" | "summary_claim_terms"
        | "headline" => "Highly related",
        "moderately_related" | "headline_plain" | "summary_keyphrases" | "summary_entities"
        | "entities" => "Moderately related",
        "somewhat_related" | "headline_domain" | "keyphrases" | "short_prefix"
        | "headlineDomain" | "keywords" => "Somewhat related",
        _ => FALLBACK_REASON,
    }
}
