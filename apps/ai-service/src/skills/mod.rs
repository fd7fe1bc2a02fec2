//! Skill Extraction — derives prioritized, badge-formatted skill strings from
//! a job description.
//!
//! Primary path is one structured completion against the LLM; any failure on
//! that path (transport, bad JSON, schema mismatch) drops to a deterministic
//! keyword scan so the operation never fails outward.

pub mod prompts;

use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use crate::llm_client::{parse_completion, ChatBackend};
use crate::skills::prompts::SKILL_EXTRACTION_SYSTEM;

/// Badge category markers, in priority order: education, experience,
/// technical, soft skill. Rendered as UI chips by the frontend.
const EDUCATION_MARKER: &str = "🎓";
const EXPERIENCE_MARKER: &str = "⏳";
const TECHNICAL_MARKER: &str = "💻";
const SOFT_SKILL_MARKER: &str = "🤝";

/// Hard caps on badge counts per category.
const MAX_TECHNICAL_BADGES: usize = 12;
const MAX_SOFT_BADGES: usize = 5;

/// Vocabulary scanned by the local fallback. Matching is a case-insensitive
/// substring test, so multi-word inputs hit single-word entries.
pub const FALLBACK_KEYWORDS: &[&str] = &[
    "python",
    "react",
    "typescript",
    "mongodb",
    "nodejs",
    "aws",
    "docker",
    "javascript",
    "sql",
    "java",
    "c++",
];

/// The four-field structure the completion must return.
/// `technical_skills` and `soft_skills` tolerate a scalar where a list was
/// asked for; models occasionally collapse single-element lists.
#[derive(Debug, Deserialize)]
struct SkillExtraction {
    #[serde(default)]
    technical_skills: Option<ListOrScalar>,
    #[serde(default)]
    education: Option<String>,
    #[serde(default)]
    experience: Option<String>,
    #[serde(default)]
    soft_skills: Option<ListOrScalar>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListOrScalar {
    List(Vec<String>),
    Scalar(String),
}

/// Extracts skill badges from job descriptions. Never fails outward: every
/// call yields a badge list, from the LLM or from the keyword fallback.
pub struct SkillExtractor {
    llm: Arc<dyn ChatBackend>,
    fallback_vocabulary: Vec<String>,
}

impl SkillExtractor {
    pub fn new(llm: Arc<dyn ChatBackend>) -> Self {
        Self::with_vocabulary(
            llm,
            FALLBACK_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// The fallback vocabulary is plain data so deployments can extend it
    /// without touching extraction logic.
    pub fn with_vocabulary(llm: Arc<dyn ChatBackend>, fallback_vocabulary: Vec<String>) -> Self {
        Self {
            llm,
            fallback_vocabulary,
        }
    }

    /// Returns the badge list for a job description. The primary/fallback
    /// choice is invisible to the caller.
    pub async fn extract(&self, job_description: &str) -> Vec<String> {
        let result = self
            .llm
            .complete(SKILL_EXTRACTION_SYSTEM, job_description)
            .await
            .and_then(|text| parse_completion::<SkillExtraction>(&text));

        match result {
            Ok(extraction) => build_badges(extraction),
            Err(e) => {
                warn!("Skill extraction LLM call failed, using keyword fallback: {e}");
                keyword_fallback(job_description, &self.fallback_vocabulary)
            }
        }
    }
}

/// Assembles badges in fixed priority order: education, experience,
/// technical skills (max 12), soft skills (max 5).
fn build_badges(extraction: SkillExtraction) -> Vec<String> {
    let mut badges = Vec::new();

    if let Some(education) = extraction.education.filter(|s| !s.trim().is_empty()) {
        badges.push(format!("{EDUCATION_MARKER} {education}"));
    }
    if let Some(experience) = extraction.experience.filter(|s| !s.trim().is_empty()) {
        badges.push(format!("{EXPERIENCE_MARKER} {experience}"));
    }

    match extraction.technical_skills {
        Some(ListOrScalar::List(skills)) => {
            badges.extend(
                skills
                    .into_iter()
                    .take(MAX_TECHNICAL_BADGES)
                    .map(|skill| format!("{TECHNICAL_MARKER} {skill}")),
            );
        }
        Some(ListOrScalar::Scalar(skill)) => {
            badges.push(format!("{TECHNICAL_MARKER} {skill}"));
        }
        None => {}
    }

    // Soft skills are only taken from a list; a scalar here is ignored.
    if let Some(ListOrScalar::List(skills)) = extraction.soft_skills {
        badges.extend(
            skills
                .into_iter()
                .take(MAX_SOFT_BADGES)
                .map(|skill| format!("{SOFT_SKILL_MARKER} {skill}")),
        );
    }

    badges
}

/// Deterministic local fallback: scans the job description for well-known
/// technology keywords. Produces only technical badges, never fails.
fn keyword_fallback(job_description: &str, vocabulary: &[String]) -> Vec<String> {
    let haystack = job_description.to_lowercase();
    vocabulary
        .iter()
        .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
        .map(|keyword| format!("{TECHNICAL_MARKER} {}", capitalize(keyword)))
        .collect()
}

/// Uppercases the first character, e.g. "aws" → "Aws".
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::llm_client::LlmError;

    /// Test double that always returns the canned completion text.
    struct StubBackend(String);

    #[async_trait]
    impl ChatBackend for StubBackend {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    /// Test double whose remote call always fails.
    struct FailingBackend;

    #[async_trait]
    impl ChatBackend for FailingBackend {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 429,
                message: "quota exceeded".to_string(),
            })
        }
    }

    fn extractor_with(response: &str) -> SkillExtractor {
        SkillExtractor::new(Arc::new(StubBackend(response.to_string())))
    }

    #[tokio::test]
    async fn test_badges_follow_priority_order() {
        let extractor = extractor_with(
            r#"{
                "technical_skills": ["Rust", "PostgreSQL"],
                "education": "B.S. in Computer Science",
                "experience": "5+ years, senior",
                "soft_skills": ["Communication"]
            }"#,
        );
        let badges = extractor.extract("any jd").await;
        assert_eq!(
            badges,
            vec![
                "🎓 B.S. in Computer Science",
                "⏳ 5+ years, senior",
                "💻 Rust",
                "💻 PostgreSQL",
                "🤝 Communication",
            ]
        );
    }

    #[tokio::test]
    async fn test_technical_badges_capped_at_12_and_soft_at_5() {
        let tech: Vec<String> = (0..20).map(|i| format!("\"Tech{i}\"")).collect();
        let soft: Vec<String> = (0..8).map(|i| format!("\"Soft{i}\"")).collect();
        let response = format!(
            r#"{{"technical_skills": [{}], "soft_skills": [{}]}}"#,
            tech.join(","),
            soft.join(",")
        );
        let badges = extractor_with(&response).extract("any jd").await;

        let tech_count = badges.iter().filter(|b| b.starts_with("💻")).count();
        let soft_count = badges.iter().filter(|b| b.starts_with("🤝")).count();
        assert_eq!(tech_count, 12);
        assert_eq!(soft_count, 5);
        // First entries survive the cap, in order.
        assert_eq!(badges[0], "💻 Tech0");
    }

    #[tokio::test]
    async fn test_scalar_technical_skills_yields_single_badge() {
        let badges = extractor_with(r#"{"technical_skills": "Kubernetes"}"#)
            .extract("any jd")
            .await;
        assert_eq!(badges, vec!["💻 Kubernetes"]);
    }

    #[tokio::test]
    async fn test_empty_education_is_omitted() {
        let badges = extractor_with(r#"{"education": "", "technical_skills": ["Go"]}"#)
            .extract("any jd")
            .await;
        assert_eq!(badges, vec!["💻 Go"]);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_keyword_scan() {
        let extractor = SkillExtractor::new(Arc::new(FailingBackend));
        let badges = extractor
            .extract("Built with Python and React, deployed on AWS")
            .await;
        assert_eq!(badges, vec!["💻 Python", "💻 React", "💻 Aws"]);
    }

    #[tokio::test]
    async fn test_malformed_json_falls_back_to_keyword_scan() {
        let extractor = extractor_with("here are the skills you asked for!");
        let badges = extractor.extract("We use Docker and SQL daily").await;
        assert_eq!(badges, vec!["💻 Docker", "💻 Sql"]);
    }

    #[tokio::test]
    async fn test_fallback_with_no_matches_is_empty() {
        let extractor = SkillExtractor::new(Arc::new(FailingBackend));
        let badges = extractor.extract("We value punctuality and teamwork").await;
        assert!(badges.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_is_deterministic_across_calls() {
        let extractor = SkillExtractor::new(Arc::new(FailingBackend));
        let jd = "Java and javascript shop, some mongodb";
        let first = extractor.extract(jd).await;
        let second = extractor.extract(jd).await;
        assert_eq!(first, second);
    }

    #[test]
    fn test_keyword_fallback_matches_case_insensitively() {
        let vocab: Vec<String> = FALLBACK_KEYWORDS.iter().map(|s| s.to_string()).collect();
        let badges = keyword_fallback("TYPESCRIPT everywhere", &vocab);
        assert_eq!(badges, vec!["💻 Typescript"]);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("aws"), "Aws");
        assert_eq!(capitalize("c++"), "C++");
        assert_eq!(capitalize(""), "");
    }
}
