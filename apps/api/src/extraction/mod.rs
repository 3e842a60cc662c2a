//! Extraction Pipeline — document bytes to plain text.
//!
//! Stage 1 reads the PDF text layer page by page. Stage 2 (OCR) runs only
//! when stage 1 produced nothing: every page is rasterized and recognized
//! independently, and a page whose OCR fails is skipped rather than
//! discarding the rest of the document.
//!
//! Both stages are blocking (parsing, subprocesses) so `extract_text` moves
//! the work onto tokio's blocking pool.

pub mod handlers;
pub mod ocr;
pub mod pdf_text;

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::extraction::ocr::{PopplerRasterizer, TesseractOcr};
use crate::extraction::pdf_text::PdfTextLayer;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to parse document: {0}")]
    Parse(String),

    #[error("document parser panicked")]
    ParserPanicked,

    #[error("failed to rasterize document: {0}")]
    Rasterize(String),

    #[error("OCR failed on page {page}: {message}")]
    Ocr { page: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("extraction task failed: {0}")]
    Join(String),

    #[error("no text found in document")]
    NoText,
}

/// Reads embedded text, one entry per page in reading order.
pub trait TextLayerExtractor: Send + Sync {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// Renders every page of a document to an image on disk.
pub trait PageRasterizer: Send + Sync {
    fn rasterize(&self, bytes: &[u8]) -> Result<RasterizedDocument, ExtractionError>;
}

/// Recognizes the text in a single page image.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &PageImage) -> Result<String, ExtractionError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// 1-based
    pub page_number: usize,
    pub path: PathBuf,
}

/// Page images plus the scratch directory that backs them.
/// The directory is removed when this value is dropped.
#[derive(Debug)]
pub struct RasterizedDocument {
    pub pages: Vec<PageImage>,
    _workdir: Option<TempDir>,
}

impl RasterizedDocument {
    pub fn new(pages: Vec<PageImage>, workdir: Option<TempDir>) -> Self {
        Self {
            pages,
            _workdir: workdir,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    TextLayer,
    Ocr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub source: TextSource,
}

#[derive(Clone)]
pub struct ExtractionPipeline {
    text_layer: Arc<dyn TextLayerExtractor>,
    rasterizer: Arc<dyn PageRasterizer>,
    ocr: Arc<dyn OcrEngine>,
    ocr_enabled: bool,
}

impl ExtractionPipeline {
    pub fn new(
        text_layer: Arc<dyn TextLayerExtractor>,
        rasterizer: Arc<dyn PageRasterizer>,
        ocr: Arc<dyn OcrEngine>,
        ocr_enabled: bool,
    ) -> Self {
        Self {
            text_layer,
            rasterizer,
            ocr,
            ocr_enabled,
        }
    }

    /// pdf-extract for the text layer, pdftoppm + tesseract for OCR.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(PdfTextLayer),
            Arc::new(PopplerRasterizer::new(config.ocr_dpi)),
            Arc::new(TesseractOcr::new(config.ocr_lang.clone())),
            config.ocr_enabled,
        )
    }

    /// Never fails: any error is logged and reported as empty text.
    pub async fn extract_text(&self, bytes: Bytes) -> String {
        let pipeline = self.clone();
        let result = tokio::task::spawn_blocking(move || pipeline.run(&bytes))
            .await
            .unwrap_or_else(|e| Err(ExtractionError::Join(e.to_string())));

        match result {
            Ok(extracted) => {
                info!(
                    "Extracted {} chars via {:?}",
                    extracted.text.len(),
                    extracted.source
                );
                extracted.text
            }
            Err(ExtractionError::NoText) => {
                info!("Document contains no extractable text");
                String::new()
            }
            Err(e) => {
                warn!("Text extraction failed: {e}");
                String::new()
            }
        }
    }

    /// Runs both stages synchronously. Call from a blocking context.
    pub fn run(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
        match self.text_layer_stage(bytes) {
            Ok(text) if !text.is_empty() => {
                return Ok(ExtractedText {
                    text,
                    source: TextSource::TextLayer,
                })
            }
            Ok(_) => debug!("Text layer is empty"),
            Err(e) => warn!("Text layer extraction failed: {e}"),
        }

        if !self.ocr_enabled {
            return Err(ExtractionError::NoText);
        }

        let text = self.ocr_stage(bytes)?;
        if text.is_empty() {
            return Err(ExtractionError::NoText);
        }
        Ok(ExtractedText {
            text,
            source: TextSource::Ocr,
        })
    }

    fn text_layer_stage(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let pages = self.text_layer.page_texts(bytes)?;
        Ok(join_pages(pages))
    }

    fn ocr_stage(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let document = self.rasterizer.rasterize(bytes)?;
        let total = document.pages.len();

        let mut texts = Vec::with_capacity(total);
        let mut last_error = None;
        for image in &document.pages {
            match self.ocr.recognize(image) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    warn!("OCR skipped page {}: {e}", image.page_number);
                    last_error = Some(e);
                }
            }
        }

        // Only a total wipe-out is an error; partial output is still useful.
        if texts.is_empty() {
            if let Some(e) = last_error {
                return Err(e);
            }
        }
        debug!("OCR recognized {}/{} pages", texts.len(), total);
        Ok(join_pages(texts))
    }
}

/// Keeps non-blank pages, joins them with newlines, trims the result.
fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
