// Prompt constants for the LLM job-list fallback.

/// Fallback listing prompt template. Replace `{keyword}` before sending.
/// Output schema matches `fallback::FallbackJob`.
pub const JOB_FALLBACK_TEMPLATE: &str = r#"Act as a job recommender assistant. Return a JSON array of 5 plausible remote job openings matching this keyword: "{keyword}".

Each array element must be an object with exactly these fields:
{
  "title": "Senior Data Engineer",
  "company": "Example Corp",
  "location": "Remote",
  "jd_text": "Two to four sentences describing the role and required skills.",
  "url": "https://example.com/jobs/123",
  "employment_type": "Full Time"
}

Return ONLY the JSON array."#;
