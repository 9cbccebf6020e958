// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it;
// this file holds the cross-cutting pieces.

/// Instruction that restricts the model to a bare JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "\
Always respond ONLY in strict JSON. \
Do not include anything outside the JSON object. \
Do not use markdown code fences. \
Do not include explanations or apologies.";
