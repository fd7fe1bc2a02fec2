use std::sync::Arc;

use crate::scoring::ResumeScorer;
use crate::skills::SkillExtractor;

/// Shared application state injected into all route handlers via Axum
/// extractors. Both components carry their own `Arc<dyn ChatBackend>`,
/// injected at startup, so handlers stay free of credential handling.
#[derive(Clone)]
pub struct AppState {
    pub skill_extractor: Arc<SkillExtractor>,
    pub resume_scorer: Arc<ResumeScorer>,
}
