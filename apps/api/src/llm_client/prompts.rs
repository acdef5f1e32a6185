// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for free-form artifacts (SVG, prose) where JSON is not wanted.
pub const RAW_OUTPUT_SYSTEM: &str = "You are a precise assistant. \
    Return only the requested artifact. \
    Do NOT wrap it in markdown code fences. \
    Do NOT add commentary before or after it.";
