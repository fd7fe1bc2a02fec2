//! Axum route handlers. Each handler calls exactly one core operation and
//! returns its result as the response body unchanged.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::extraction;
use crate::scoring::ScoringResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractSkillsResponse {
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResumeRequest {
    pub job_description: String,
    pub resume_text: String,
}

/// POST /parse-resume
/// Accepts a multipart upload (field `file`) and returns the extracted text.
pub async fn handle_parse_resume(
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .ok_or_else(|| AppError::Validation("Uploaded file has no filename".to_string()))?
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;

        let extracted = extraction::extract(&bytes, &filename)?;

        return Ok(Json(match extracted.warning {
            Some(warning) => json!({ "text": "", "warning": warning }),
            None => json!({ "text": extracted.text, "filename": filename }),
        }));
    }

    Err(AppError::Validation(
        "Missing multipart field 'file'".to_string(),
    ))
}

/// POST /extract-skills
/// Never fails outward: the extractor falls back to a local keyword scan.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(req): Json<ExtractSkillsRequest>,
) -> Json<ExtractSkillsResponse> {
    let skills = state.skill_extractor.extract(&req.job_description).await;
    Json(ExtractSkillsResponse { skills })
}

/// POST /analyze-resume
/// Never fails outward: the scorer falls back to a fixed canned result.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeResumeRequest>,
) -> Json<ScoringResult> {
    info!(
        "Analyzing resume for JD length: {}",
        req.job_description.len()
    );
    let result = state
        .resume_scorer
        .score(&req.job_description, &req.resume_text)
        .await;
    Json(result)
}
