//! OCR path for regions where text extraction yields nothing useful.
//!
//! The page is rendered at a fixed upscale, cropped to the region,
//! grayscaled and binarized at a fixed threshold, then handed to the OCR
//! collaborator as a single uniform block. The returned text is split into
//! pseudo-columns on runs of two or more whitespace characters. An OCR
//! failure on one region never aborts the remaining regions or pages.

use anyhow::Result;
use image::GrayImage;
use ledgerlift_core::Region;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use crate::convert::select_columns;
use crate::source::{OcrEngine, PageSource};

/// Render upscale factor (≈216 DPI on letter-size pages).
pub const OCR_RENDER_SCALE: f64 = 3.0;

/// Fixed binarization threshold applied to the grayscale crop.
pub const BINARIZE_THRESHOLD: u8 = 140;

static COLUMN_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("column split pattern"));

/// OCR one region into raw rows. Failures are logged and yield zero rows.
pub fn ocr_region(
    source: &dyn PageSource,
    engine: &dyn OcrEngine,
    page: usize,
    region: &Region,
    column_indices: Option<&[usize]>,
) -> Vec<Vec<String>> {
    match try_ocr(source, engine, page, region) {
        Ok(text) => split_pseudo_columns(&text, column_indices),
        Err(err) => {
            warn!(page, error = %err, "OCR failed for region, skipping");
            Vec::new()
        }
    }
}

fn try_ocr(
    source: &dyn PageSource,
    engine: &dyn OcrEngine,
    page: usize,
    region: &Region,
) -> Result<String> {
    let rendered = source.render(page, OCR_RENDER_SCALE)?;
    let scaled = region.scaled(OCR_RENDER_SCALE);
    let cropped = rendered.crop_imm(
        scaled.x0.max(0.0) as u32,
        scaled.y0.max(0.0) as u32,
        (scaled.x1 - scaled.x0).max(0.0) as u32,
        (scaled.y1 - scaled.y0).max(0.0) as u32,
    );
    let binarized = binarize(cropped.to_luma8());
    engine.recognize(&binarized)
}

fn binarize(mut gray: GrayImage) -> GrayImage {
    for pixel in gray.pixels_mut() {
        pixel.0[0] = if pixel.0[0] < BINARIZE_THRESHOLD { 0 } else { 255 };
    }
    gray
}

/// Split OCR text into rows of pseudo-columns on 2+ whitespace runs.
fn split_pseudo_columns(text: &str, column_indices: Option<&[usize]>) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parts: Vec<String> = COLUMN_SPLIT_RE
            .split(line)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        let row = select_columns(parts, column_indices);
        if row.iter().any(|c| !c.is_empty()) {
            rows.push(row);
        }
    }
    rows
}
