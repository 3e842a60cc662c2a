//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::analysis::models::{AnalysisResult, RoadmapResult};
use crate::errors::AppError;
use crate::state::AppState;
use crate::upload::ResumeForm;

/// Résumé text and job description, ready for analysis.
struct AnalysisInput {
    resume_text: String,
    job_desc: String,
}

/// POST /analyze
///
/// Accepts a PDF (`resumeFile`) or raw text (`resumeText`) plus an optional
/// `jobDesc` and returns the match score, missing keywords and suggestions.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let input = resolve_input(&state, multipart).await?;
    let result = state
        .analyzer
        .analyze(&input.resume_text, &input.job_desc)
        .await;
    info!("Analysis complete: match_score={}", result.match_score);
    Ok(Json(result))
}

/// POST /roadmap
///
/// Same form as `/analyze`; returns skill gaps and a phased learning roadmap.
pub async fn handle_roadmap(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<RoadmapResult>, AppError> {
    let input = resolve_input(&state, multipart).await?;
    let result = state
        .analyzer
        .roadmap(&input.resume_text, &input.job_desc)
        .await;
    info!(
        "Roadmap complete: {} gaps, {} phases",
        result.skill_gaps.len(),
        result.roadmap.len()
    );
    Ok(Json(result))
}

/// Text extracted from an uploaded file wins over pasted text when non-empty.
async fn resolve_input(state: &AppState, multipart: Multipart) -> Result<AnalysisInput, AppError> {
    let form = ResumeForm::read(multipart).await?;
    let job_desc = form.job_desc();

    let has_text = form.resume_text.as_deref().is_some_and(|t| !t.is_empty());
    if form.resume_file.is_none() && !has_text {
        return Err(AppError::Validation(
            "Provide resumeFile or resumeText.".to_string(),
        ));
    }

    let extracted = match form.resume_file {
        Some(file) => {
            let bytes = file.into_pdf_bytes()?;
            state.extractor.extract_text(bytes).await
        }
        None => String::new(),
    };

    let resume_text = if extracted.is_empty() {
        form.resume_text.unwrap_or_default().trim().to_string()
    } else {
        extracted
    };

    if resume_text.is_empty() {
        return Err(AppError::Validation(
            "Could not extract resume text. Try another file.".to_string(),
        ));
    }

    Ok(AnalysisInput {
        resume_text,
        job_desc,
    })
}
