//! `PageSource` over a JSON extraction dump.
//!
//! The dump is produced by an external extractor: one entry per page, with
//! the page's plain text and/or word boxes. This keeps document decoding
//! and layout analysis outside the engine while still exercising every
//! conversion path.

use anyhow::{Context, Result, bail};
use image::DynamicImage;
use ledgerlift_core::{Region, Word, merge_words};
use ledgerlift_ingest::{PageSource, TableStrategy};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static CELL_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("cell split pattern"));

#[derive(Debug, Deserialize)]
pub struct DumpPage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub words: Vec<Word>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractionDump {
    pub pages: Vec<DumpPage>,
}

pub struct DumpSource {
    dump: ExtractionDump,
}

impl DumpSource {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let dump: ExtractionDump =
            serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
        Ok(Self { dump })
    }

    fn page(&self, page: usize) -> Result<&DumpPage> {
        self.dump
            .pages
            .get(page)
            .with_context(|| format!("page {page} out of range"))
    }
}

impl PageSource for DumpSource {
    fn page_count(&self) -> usize {
        self.dump.pages.len()
    }

    fn text(&self, page: usize, region: Option<&Region>) -> Result<Option<String>> {
        let p = self.page(page)?;
        match region {
            // Cropped text is rebuilt from word boxes when available;
            // without them the whole-page text is the best we have.
            Some(region) if !p.words.is_empty() => {
                let mut words = self.words(page, region)?;
                if words.is_empty() {
                    return Ok(None);
                }
                for w in &mut words {
                    w.col = 0;
                }
                let lines: Vec<String> = merge_words(words, 1)
                    .into_iter()
                    .map(|row| row.into_iter().next().unwrap_or_default())
                    .collect();
                Ok(Some(lines.join("\n")))
            }
            _ => Ok(p.text.clone()),
        }
    }

    fn words(&self, page: usize, region: &Region) -> Result<Vec<Word>> {
        let p = self.page(page)?;
        Ok(p.words
            .iter()
            .filter(|w| {
                let mid = (w.top + w.bottom) / 2.0;
                w.x0 >= region.x0 && w.x0 <= region.x1 && mid >= region.y0 && mid <= region.y1
            })
            .cloned()
            .collect())
    }

    fn table(
        &self,
        page: usize,
        region: &Region,
        _strategy: TableStrategy,
    ) -> Result<Vec<Vec<String>>> {
        // A text dump has no ruling lines; both strategies reduce to
        // whitespace-gap splitting.
        let Some(text) = self.text(page, Some(region))? else {
            return Ok(Vec::new());
        };
        Ok(text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                CELL_SPLIT_RE
                    .split(l.trim())
                    .map(str::to_string)
                    .collect()
            })
            .collect())
    }

    fn render(&self, page: usize, _scale: f64) -> Result<DynamicImage> {
        bail!("extraction dump carries no page images (page {page})")
    }
}
