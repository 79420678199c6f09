// Prompt constants for the semantic fit scorer.

/// System prompt for the semantic fit score — number-only output.
pub const SEMANTIC_SCORE_SYSTEM: &str = "You are a seasoned hiring manager evaluating \
    candidate fit for software and data roles. \
    You MUST respond with a single integer from 0 to 100 and nothing else. \
    No percent sign, no explanation, no punctuation.";

/// Semantic score prompt template. Replace `{resume}` and `{jd_text}` before sending.
pub const SEMANTIC_SCORE_TEMPLATE: &str = r#"Resume:
{resume}

Job Description:
{jd_text}

Score from 0 to 100 how well this resume fits the job description, considering
skills, responsibilities, and experience. Only output the number."#;
