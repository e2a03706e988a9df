//! Axum route handlers for export validation and ATS scoring.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ats::impact::{check_impact, ImpactReport};
use crate::ats::validation::{validate_record, ValidationReport};
use crate::ats::AtsReport;
use crate::errors::AppError;
use crate::models::ResumeRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub record: ResumeRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub validation: ValidationReport,
    pub impact: ImpactReport,
    /// Required fields present and every bullet quantified.
    pub ready_to_export: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreRequest {
    pub record: ResumeRecord,
    pub job_description: String,
}

/// POST /api/v1/resumes/validate
pub async fn handle_validate(Json(request): Json<ValidateRequest>) -> Json<ValidateResponse> {
    let validation = validate_record(&request.record);
    let impact = check_impact(&request.record);
    let ready_to_export = validation.valid && impact.passed();
    debug!(
        issues = validation.issues.len(),
        weak_bullets = impact.findings.len(),
        ready_to_export,
        "record validated"
    );

    Json(ValidateResponse {
        validation,
        impact,
        ready_to_export,
    })
}

/// POST /api/v1/resumes/ats-score
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Json(request): Json<AtsScoreRequest>,
) -> Result<Json<AtsReport>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }

    let report = state
        .ats_scorer
        .score(&request.record, &request.job_description)
        .await?;
    Ok(Json(report))
}
