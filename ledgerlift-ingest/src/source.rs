//! Contracts for the extraction collaborators.
//!
//! Document decoding, text extraction, and OCR are external concerns; the
//! engine consumes them through these traits and treats every failure as
//! "no rows for this unit".

use anyhow::Result;
use image::{DynamicImage, GrayImage};
use ledgerlift_core::{Region, Word};

/// How the collaborator should detect table cells inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStrategy {
    /// Infer columns from text alignment (no ruling lines).
    #[default]
    Text,
    /// Follow ruled grid lines.
    Lines,
}

/// A decoded document able to yield text, words, tables, and page images.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Plain text of a page, optionally cropped to a region. `Ok(None)`
    /// means the page (or region) has no extractable text.
    fn text(&self, page: usize, region: Option<&Region>) -> Result<Option<String>>;

    /// Word-level extraction (text plus bounding box) within a region.
    fn words(&self, page: usize, region: &Region) -> Result<Vec<Word>>;

    /// Table extraction within a region; layout-aware detection is the
    /// collaborator's responsibility.
    fn table(&self, page: usize, region: &Region, strategy: TableStrategy)
    -> Result<Vec<Vec<String>>>;

    /// Render the full page as an image, all coordinates multiplied by
    /// `scale`.
    fn render(&self, page: usize, scale: f64) -> Result<DynamicImage>;
}

/// Black-box OCR over a binarized single block of text.
pub trait OcrEngine {
    fn recognize(&self, image: &GrayImage) -> Result<String>;
}
