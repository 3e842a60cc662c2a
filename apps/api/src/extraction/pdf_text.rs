use std::panic::{self, AssertUnwindSafe};

use crate::extraction::{ExtractionError, TextLayerExtractor};

/// Text-layer extraction backed by `pdf-extract`.
///
/// pdf-extract can panic on malformed fonts or encodings; the panic is
/// caught here so the pipeline can still try OCR.
pub struct PdfTextLayer;

impl TextLayerExtractor for PdfTextLayer {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        if !looks_like_pdf(bytes) {
            return Err(ExtractionError::Parse("missing %PDF header".to_string()));
        }

        panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }))
        .map_err(|_| ExtractionError::ParserPanicked)?
        .map_err(|e| ExtractionError::Parse(e.to_string()))
    }
}

/// The header may be preceded by junk bytes; readers accept it within the first 1 KiB.
fn looks_like_pdf(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    head.windows(5).any(|w| w == b"%PDF-")
}
