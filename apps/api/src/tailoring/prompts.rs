// Prompt constants for the tailoring orchestrator.

use crate::llm_client::prompts::NO_FABRICATION_INSTRUCTION;

/// System prompt for the résumé rewrite — plain text out, no commentary.
pub fn tailor_system() -> String {
    format!(
        "You are an expert resume writer tailoring a candidate's resume to a \
         specific job posting. Return ONLY the rewritten resume as plain text. \
         Do NOT add commentary, headers about your changes, or markdown fences. \
         {NO_FABRICATION_INSTRUCTION}"
    )
}

/// Rewrite prompt template.
/// Replace `{role}`, `{company}`, `{resume}`, `{jd_text}` before sending.
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"Rewrite the resume below so it is tailored for the role of {role} at {company}.

Rules:
- Reorder and re-emphasize EXISTING content so the most relevant experience leads.
- Mirror the job description's terminology where the resume already supports it.
- Keep every employer, title, and date exactly as written — invent nothing.
- Keep roughly the original length.

Job Description:
{jd_text}

Resume:
{resume}"#;
