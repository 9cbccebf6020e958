//! Score tiers shared by every place a score is displayed.
//!
//! A score is classified by its percentage of the field's maximum:
//! good at 75% or more, caution at 50% or more, poor otherwise.

use std::fmt;

use crate::advisory::models::AdvisoryResult;

pub const OVERALL_MAX: u32 = 100;
pub const ASPECT_MAX: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Good,
    Caution,
    Poor,
}

impl ScoreTier {
    pub fn classify(score: u32, max: u32) -> Self {
        if max == 0 {
            return ScoreTier::Poor;
        }
        // Integer form of `score / max * 100 >= threshold`.
        let scaled = u64::from(score) * 100;
        let max = u64::from(max);
        if scaled >= 75 * max {
            ScoreTier::Good
        } else if scaled >= 50 * max {
            ScoreTier::Caution
        } else {
            ScoreTier::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreTier::Good => "good",
            ScoreTier::Caution => "caution",
            ScoreTier::Poor => "poor",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ScoreTier::Good => "✅",
            ScoreTier::Caution => "⚠️",
            ScoreTier::Poor => "❌",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn badge(name: &str, score: u32, max: u32) -> String {
    let tier = ScoreTier::classify(score, max);
    format!("{} {name} {score}/{max} ({tier})", tier.icon())
}

/// One-line tiered summary of a result, e.g.
/// `Roundup: ❌ overall 42/100 (poor), ❌ safety 2/5 (poor), ✅ effectiveness 4/5 (good)`.
pub fn summarize(result: &AdvisoryResult) -> String {
    format!(
        "{}: {}, {}, {}",
        result.product,
        badge("overall", result.overall.score.into(), OVERALL_MAX),
        badge("safety", result.safety.score.into(), ASPECT_MAX),
        badge("effectiveness", result.effectiveness.score.into(), ASPECT_MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::models::{Overall, RatedAspect, Recommendation};

    #[test]
    fn test_classify_thresholds_out_of_100() {
        assert_eq!(ScoreTier::classify(100, 100), ScoreTier::Good);
        assert_eq!(ScoreTier::classify(75, 100), ScoreTier::Good);
        assert_eq!(ScoreTier::classify(74, 100), ScoreTier::Caution);
        assert_eq!(ScoreTier::classify(50, 100), ScoreTier::Caution);
        assert_eq!(ScoreTier::classify(49, 100), ScoreTier::Poor);
        assert_eq!(ScoreTier::classify(1, 100), ScoreTier::Poor);
    }

    #[test]
    fn test_classify_thresholds_out_of_5() {
        assert_eq!(ScoreTier::classify(5, 5), ScoreTier::Good);
        assert_eq!(ScoreTier::classify(4, 5), ScoreTier::Good); // 80%
        assert_eq!(ScoreTier::classify(3, 5), ScoreTier::Caution); // 60%
        assert_eq!(ScoreTier::classify(2, 5), ScoreTier::Poor); // 40%
    }

    #[test]
    fn test_zero_max_is_poor() {
        assert_eq!(ScoreTier::classify(3, 0), ScoreTier::Poor);
    }

    #[test]
    fn test_tier_styles() {
        assert_eq!(ScoreTier::Good.icon(), "✅");
        assert_eq!(ScoreTier::Caution.icon(), "⚠️");
        assert_eq!(ScoreTier::Poor.to_string(), "poor");
    }

    #[test]
    fn test_summarize_lists_each_score() {
        let result = AdvisoryResult {
            product: "Roundup".to_string(),
            safety: RatedAspect {
                score: 2,
                details: None,
            },
            effectiveness: RatedAspect {
                score: 4,
                details: None,
            },
            overall: Overall {
                score: 42,
                summary: None,
            },
            recommendation: Recommendation::default(),
            extra: Default::default(),
        };
        assert_eq!(
            summarize(&result),
            "Roundup: ❌ overall 42/100 (poor), ❌ safety 2/5 (poor), ✅ effectiveness 4/5 (good)"
        );
    }
}
