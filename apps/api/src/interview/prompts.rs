// Prompt constants for interview question generation.

/// Question generation prompt template.
/// Replace `{round}`, `{resume}`, `{jd_text}` before sending.
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"You are preparing a candidate for a {round} interview round.

Generate 5 interview questions tailored to this candidate and role. Base the
questions on the overlap (and gaps) between the resume and the job
description. Return a JSON array of 5 question strings and nothing else.

Resume:
{resume}

Job Description:
{jd_text}"#;
