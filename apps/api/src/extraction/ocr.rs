//! OCR backends that shell out to poppler-utils and tesseract.
//!
//! `pdftoppm` renders each page to PNG inside a scratch directory and
//! `tesseract` reads one PNG at a time. Both binaries must be on `PATH`;
//! when they are not, the spawn error surfaces as an `ExtractionError`.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;
use tracing::debug;

use crate::extraction::{ExtractionError, OcrEngine, PageImage, PageRasterizer, RasterizedDocument};

const PAGE_PREFIX: &str = "page";

pub struct PopplerRasterizer {
    dpi: u32,
}

impl PopplerRasterizer {
    pub fn new(dpi: u32) -> Self {
        Self { dpi }
    }
}

impl PageRasterizer for PopplerRasterizer {
    fn rasterize(&self, bytes: &[u8]) -> Result<RasterizedDocument, ExtractionError> {
        let workdir = TempDir::new()?;
        let input = workdir.path().join("input.pdf");
        std::fs::write(&input, bytes)?;

        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(&input)
            .arg(workdir.path().join(PAGE_PREFIX))
            .output()
            .map_err(|e| ExtractionError::Rasterize(format!("could not run pdftoppm: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Rasterize(stderr.trim().to_string()));
        }

        let pages = collect_page_images(workdir.path())?;
        if pages.is_empty() {
            return Err(ExtractionError::Rasterize(
                "pdftoppm produced no pages".to_string(),
            ));
        }
        debug!("Rasterized {} pages at {} dpi", pages.len(), self.dpi);

        Ok(RasterizedDocument::new(pages, Some(workdir)))
    }
}

/// Finds `page-N.png` files and orders them by page number.
fn collect_page_images(dir: &Path) -> Result<Vec<PageImage>, ExtractionError> {
    let mut pages: Vec<PageImage> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter_map(|path| {
            let page_number = page_number_of(&path)?;
            Some(PageImage { page_number, path })
        })
        .collect();

    pages.sort_by_key(|p| p.page_number);
    Ok(pages)
}

/// `page-007.png` → 7. pdftoppm zero-pads to the width of the page count.
fn page_number_of(path: &Path) -> Option<usize> {
    if path.extension()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix(PAGE_PREFIX)?
        .strip_prefix('-')?
        .parse()
        .ok()
}

pub struct TesseractOcr {
    lang: String,
}

impl TesseractOcr {
    pub fn new(lang: String) -> Self {
        Self { lang }
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &PageImage) -> Result<String, ExtractionError> {
        let ocr_error = |message: String| ExtractionError::Ocr {
            page: image.page_number,
            message,
        };

        let output = Command::new("tesseract")
            .arg(&image.path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .output()
            .map_err(|e| ocr_error(format!("could not run tesseract: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ocr_error(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
