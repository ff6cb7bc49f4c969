// Shared prompt fragments.
// Each handler in `generation` owns its own prompt templates; this file holds the
// cross-cutting pieces.

/// System instruction for every structured (schema-bound) call.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant for a campus \
    placement platform. \
    You MUST respond with valid JSON only, matching the response schema exactly. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to prompts that embed user-authored free text.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    Base every statement on the details provided. \
    Do NOT invent employers, degrees, metrics or certifications the candidate did not mention.";
