// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments only.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt fragment that forbids fabricating candidate facts.
/// Appended wherever the model rewrites or reasons about a résumé.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: Work only with facts present in the candidate's résumé. \
    Do NOT invent employers, job titles, dates, degrees, or certifications. \
    Reordering and re-emphasizing existing content is allowed; adding new \
    experience is not.";
