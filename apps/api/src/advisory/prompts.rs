// Product advisory prompt templates.
// All prompts for the advisory module are defined here.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

pub const ADVISOR_PERSONA: &str = "\
You are a helpful assistant that rates gardening products for home gardeners. \
You evaluate products and ingredient lists for safety to people, pets, pollinators and soil, \
and for how well they do the job they claim to do.";

pub const ADVISORY_TASKS: &str = r#"For the product or ingredient list in the user message:
1. Rate safety from 1 (harmful, toxic or banned) to 5 (safe, organic, eco-friendly).
2. Rate effectiveness from 1 (does not work) to 5 (works very well).
3. Give an overall score from 1 to 100.
4. Write a summary of 20 to 50 words (aim for about 35) that is easy to read.
5. Recommend a commonly available alternative that is not the same as the input product, justify it in at most 25 words, and list comma-separated shopping keywords for it."#;

pub const ADVISORY_SCHEMA: &str = r#"OUTPUT SCHEMA (return exactly this structure):
{
  "product": "Product name",
  "safety": { "score": 1-5, "details": "explanation" },
  "effectiveness": { "score": 1-5, "details": "explanation" },
  "overall": { "score": 1-100, "summary": "summary of 20-50 words" },
  "recommendation": {
    "alternative": "Specific product or ingredient-based alternative",
    "reason": "at most 25 words, why this is a safer or more effective alternative",
    "keywords": "comma-separated shopping keywords"
  }
}"#;

pub const ADVISORY_RULES: &str = r#"RULES:
1. "overall.summary" MUST be between 20 and 50 words.
2. Be concise and neutral; no hype.
3. "recommendation.reason" max 25 words.
4. "recommendation.keywords" should be concrete (e.g., "cold-pressed neem oil, horticultural spray, OMRI").
5. Scores must be whole numbers inside their ranges."#;

/// The message pair sent upstream for one advisory request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryPrompt {
    /// Persona, task list and output contract.
    pub system: String,
    /// The user's product name or ingredient list, trimmed.
    pub user: String,
}

/// Builds the advisory prompt for `free_text`. Pure and deterministic.
pub fn build_prompt(free_text: &str) -> AdvisoryPrompt {
    let system = [
        ADVISOR_PERSONA,
        JSON_ONLY_INSTRUCTION,
        ADVISORY_TASKS,
        ADVISORY_SCHEMA,
        ADVISORY_RULES,
    ]
    .join("\n\n");

    AdvisoryPrompt {
        system,
        user: free_text.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_every_result_field() {
        let prompt = build_prompt("Roundup Weed Killer");
        for field in [
            "\"product\"",
            "\"safety\"",
            "\"effectiveness\"",
            "\"overall\"",
            "\"recommendation\"",
            "\"alternative\"",
            "\"reason\"",
            "\"keywords\"",
        ] {
            assert!(prompt.system.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_prompt_restricts_output_to_json() {
        let prompt = build_prompt("glyphosate, water");
        assert!(prompt.system.contains("ONLY in strict JSON"));
        assert!(prompt.system.contains("Do not include anything outside the JSON object"));
    }

    #[test]
    fn test_prompt_states_ranges_and_word_limits() {
        let prompt = build_prompt("Compost");
        assert!(prompt.system.contains("1 (harmful"));
        assert!(prompt.system.contains("from 1 to 100"));
        assert!(prompt.system.contains("20 to 50 words"));
        assert!(prompt.system.contains("at most 25 words"));
    }

    #[test]
    fn test_prompt_is_deterministic_and_trims_input() {
        let a = build_prompt("  Neem Oil  \n");
        let b = build_prompt("Neem Oil");
        assert_eq!(a, b);
        assert_eq!(a.user, "Neem Oil");
        assert!(!a.system.contains("Neem Oil"));
    }
}
