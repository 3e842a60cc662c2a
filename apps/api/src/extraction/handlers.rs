//! Axum route handler for the Extraction API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::upload::ResumeForm;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

/// POST /extract
///
/// Returns the plain text of an uploaded PDF, falling back to OCR for scans.
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let form = ResumeForm::read(multipart).await?;
    let file = form
        .resume_file
        .ok_or_else(|| AppError::Validation("resumeFile is required.".to_string()))?;
    let bytes = file.into_pdf_bytes()?;

    let text = state.extractor.extract_text(bytes).await;
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Could not extract text from the provided PDF.".to_string(),
        ));
    }

    Ok(Json(ExtractResponse { text }))
}
