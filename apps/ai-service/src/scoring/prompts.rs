// LLM prompt constants for resume scoring.

/// System prompt for resume analysis — enforces JSON-only output.
pub const SCORING_SYSTEM: &str = "You are a recruitment expert. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Builds the scoring prompt. A single `format!` so placeholder-looking text
/// inside either input is never re-substituted.
pub fn scoring_prompt(job_description: &str, resume_text: &str) -> String {
    format!(
        r#"Analyze the following resume against the job description.

Job Description:
{job_description}

Resume:
{resume_text}

Provide: Score (0-100), Reasoning, and 5 Interview Questions.
Return ONLY a JSON object with keys: "score", "reasoning", "interview_questions".
- "score" must be an integer between 0 and 100
- "reasoning" must be a string
- "interview_questions" must be a list of exactly 5 strings"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_both_texts_verbatim() {
        let prompt = scoring_prompt("Rust backend role", "Six years of Rust");
        assert!(prompt.contains("Job Description:\nRust backend role"));
        assert!(prompt.contains("Resume:\nSix years of Rust"));
    }

    #[test]
    fn test_placeholder_looking_input_is_not_resubstituted() {
        let prompt = scoring_prompt("JD quoting {resume_text} literally", "actual resume");
        assert!(prompt.contains("JD quoting {resume_text} literally"));
        assert!(prompt.contains("Resume:\nactual resume"));
    }
}
