//! Response normalizer: turns raw model text into a validated `AdvisoryResult`.
//!
//! Steps:
//! 1. Strip markdown code fences, parse as JSON (failure → `InvalidJson`)
//! 2. Check the shape and coerce scores into range (failure → `Schema`)
//! 3. Cap `overall.summary` at 50 words, silently
//! 4. Derive `recommendation.affiliateLink`, replacing anything the model sent

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::advisory::affiliate::AffiliateLinker;
use crate::advisory::models::{AdvisoryResult, Overall, RatedAspect, Recommendation};

pub const SUMMARY_MAX_WORDS: usize = 50;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("model output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("model output does not match the advisory schema: {0}")]
    Schema(String),
}

// Wire shapes: scores arrive as arbitrary JSON and are coerced afterwards.

#[derive(Debug, Deserialize)]
struct WireResult {
    product: String,
    safety: WireAspect,
    effectiveness: WireAspect,
    overall: WireOverall,
    #[serde(default)]
    recommendation: Option<WireRecommendation>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct WireAspect {
    score: Value,
    #[serde(default)]
    details: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireOverall {
    score: Value,
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireRecommendation {
    #[serde(default)]
    alternative: Option<String>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    keywords: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Parses and validates raw model text. No partial result is ever returned.
pub fn normalize(raw: &str, linker: &AffiliateLinker) -> Result<AdvisoryResult, NormalizeError> {
    let value: Value = serde_json::from_str(strip_json_fences(raw))?;
    if !value.is_object() {
        return Err(NormalizeError::Schema(
            "top-level value is not an object".to_string(),
        ));
    }

    let wire: WireResult =
        serde_json::from_value(value).map_err(|e| NormalizeError::Schema(e.to_string()))?;

    let safety = RatedAspect {
        score: coerce_score(&wire.safety.score, 5, "safety.score")? as u8,
        details: wire.safety.details,
    };
    let effectiveness = RatedAspect {
        score: coerce_score(&wire.effectiveness.score, 5, "effectiveness.score")? as u8,
        details: wire.effectiveness.details,
    };
    let overall = Overall {
        score: coerce_score(&wire.overall.score, 100, "overall.score")? as u8,
        summary: wire
            .overall
            .summary
            .map(|s| cap_words(&s, SUMMARY_MAX_WORDS)),
    };

    let mut rec = wire.recommendation.unwrap_or_default();
    // Upstream-supplied links are never trusted.
    rec.extra.remove("affiliateLink");

    let query = [&rec.keywords, &rec.alternative]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .map(String::as_str)
        .unwrap_or("");
    let affiliate_link = linker.link(query);

    Ok(AdvisoryResult {
        product: wire.product,
        safety,
        effectiveness,
        overall,
        recommendation: Recommendation {
            alternative: rec.alternative,
            reason: rec.reason,
            keywords: rec.keywords,
            affiliate_link,
            extra: rec.extra,
        },
        extra: wire.extra,
    })
}

/// Accepts a number or numeric string, rounds it, and clamps it into `[1, max]`.
fn coerce_score(value: &Value, max: u32, field: &str) -> Result<u32, NormalizeError> {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
    .ok_or_else(|| NormalizeError::Schema(format!("{field} is not a number: {value}")))?;

    let clamped = raw.round().clamp(1.0, max as f64) as u32;
    if (clamped as f64 - raw).abs() > f64::EPSILON {
        warn!("Coerced {field} from {raw} to {clamped}");
    }
    Ok(clamped)
}

/// Keeps the first `max` whitespace-delimited words, joined by single spaces.
/// Text already within the limit is returned unchanged.
pub fn cap_words(text: &str, max: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max {
        return text.to_string();
    }
    words[..max].join(" ")
}

/// Strips a ```json or bare ``` fence around the model's reply, if present.
/// A missing closing fence is tolerated.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };
    let body = body.strip_prefix("json").unwrap_or(body).trim_start();
    body.strip_suffix("```").unwrap_or(body).trim()
}
