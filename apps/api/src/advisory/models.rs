use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One user submission. Holds non-blank free text.
#[derive(Debug, Clone)]
pub struct AdvisoryRequest {
    free_text: String,
}

impl AdvisoryRequest {
    /// Returns `None` for empty or whitespace-only text.
    pub fn new(free_text: &str) -> Option<Self> {
        let trimmed = free_text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            free_text: trimmed.to_string(),
        })
    }

    pub fn free_text(&self) -> &str {
        &self.free_text
    }
}

/// A score in `[1, 5]` plus the model's explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedAspect {
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overall {
    pub score: u8, // 1 – 100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Always derived locally; never taken from the model.
    pub affiliate_link: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The normalized scan result returned by `POST /api/scan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryResult {
    pub product: String,
    pub safety: RatedAspect,
    pub effectiveness: RatedAspect,
    pub overall: Overall,
    pub recommendation: Recommendation,
    /// Fields the model added beyond the contract, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
