//! Multipart intake shared by the résumé routes.

use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;

use crate::errors::AppError;

const ACCEPTED_CONTENT_TYPES: &[&str] = &["application/pdf", "application/octet-stream"];

/// Form fields accepted by `/analyze`, `/roadmap` and `/extract`.
#[derive(Debug, Default)]
pub struct ResumeForm {
    pub resume_file: Option<UploadedFile>,
    pub resume_text: Option<String>,
    pub job_desc: Option<String>,
}

#[derive(Debug)]
pub struct UploadedFile {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Rejects non-PDF content types and empty bodies.
    pub fn into_pdf_bytes(self) -> Result<Bytes, AppError> {
        let accepted = self
            .content_type
            .as_deref()
            .map(|ct| ACCEPTED_CONTENT_TYPES.contains(&ct))
            .unwrap_or(false);
        if !accepted {
            return Err(AppError::Validation(
                "Only PDF files are supported.".to_string(),
            ));
        }
        if self.bytes.is_empty() {
            return Err(AppError::Validation("Empty file received.".to_string()));
        }
        Ok(self.bytes)
    }
}

impl ResumeForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = ResumeForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("resumeFile") => form.resume_file = read_file(field).await?,
                Some("resumeText") => form.resume_text = Some(read_text(field).await?),
                Some("jobDesc") => form.job_desc = Some(read_text(field).await?),
                _ => {}
            }
        }

        Ok(form)
    }

    /// Trimmed job description, empty when absent.
    pub fn job_desc(&self) -> String {
        self.job_desc.as_deref().unwrap_or_default().trim().to_string()
    }
}

/// Browsers send an empty file part when no file was chosen; treat it as absent.
async fn read_file(field: Field<'_>) -> Result<Option<UploadedFile>, AppError> {
    let has_filename = field.file_name().is_some_and(|n| !n.is_empty());
    let content_type = field.content_type().map(|ct| {
        ct.split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    });
    let bytes = field.bytes().await.map_err(multipart_error)?;

    if !has_filename && bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(UploadedFile {
        content_type,
        bytes,
    }))
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(multipart_error)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: Option<&str>, bytes: &'static [u8]) -> UploadedFile {
        UploadedFile {
            content_type: content_type.map(str::to_string),
            bytes: Bytes::from_static(bytes),
        }
    }

    #[test]
    fn test_pdf_accepted() {
        let bytes = file(Some("application/pdf"), b"%PDF-1.4").into_pdf_bytes().unwrap();
        assert_eq!(&bytes[..], b"%PDF-1.4");
    }

    #[test]
    fn test_octet_stream_accepted() {
        assert!(file(Some("application/octet-stream"), b"x").into_pdf_bytes().is_ok());
    }

    #[test]
    fn test_other_types_rejected() {
        let err = file(Some("image/png"), b"x").into_pdf_bytes().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Only PDF files are supported."));
        assert!(file(None, b"x").into_pdf_bytes().is_err());
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = file(Some("application/pdf"), b"").into_pdf_bytes().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Empty file received."));
    }

    #[test]
    fn test_job_desc_trimmed() {
        let form = ResumeForm {
            job_desc: Some("  Rust \n".to_string()),
            ..ResumeForm::default()
        };
        assert_eq!(form.job_desc(), "Rust");
        assert_eq!(ResumeForm::default().job_desc(), "");
    }
}
