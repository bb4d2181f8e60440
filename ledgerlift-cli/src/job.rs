//! TOML job files for custom (area-driven) conversions.
//!
//! A job file carries everything the area-selection step produced: the
//! rectangles per page (or for every page), optional headers, a column
//! subset, and post-processing flags.
//!
//! ```toml
//! merge_multiline = true
//! skip_rows = 1
//! headers = ["Date", "Narration", "Debit", "Credit", "Balance"]
//!
//! # Same areas on every page; each area is [x0, y0, x1, y1].
//! all_pages = [[30.0, 120.0, 90.0, 700.0], [95.0, 120.0, 560.0, 700.0]]
//! ```

use anyhow::{Context, Result, bail};
use ledgerlift_core::{AreaMap, Region};
use ledgerlift_ingest::{CustomOptions, TableStrategy};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFile {
    #[serde(default)]
    pub headers: Option<Vec<String>>,
    #[serde(default)]
    pub columns: Option<Vec<usize>>,
    #[serde(default)]
    pub skip_rows: usize,
    #[serde(default)]
    pub merge_multiline: bool,
    #[serde(default)]
    pub use_ocr: bool,
    /// Follow ruled grid lines instead of text alignment.
    #[serde(default)]
    pub grid_lines: bool,
    /// Areas applied to every page.
    #[serde(default)]
    pub all_pages: Option<Vec<[f64; 4]>>,
    /// Areas per page index (TOML keys are strings: `[pages.0]` etc.).
    #[serde(default)]
    pub pages: Option<BTreeMap<String, Vec<[f64; 4]>>>,
}

impl JobFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parse {}", path.display()))
    }

    fn area_map(&self) -> Result<Option<AreaMap>> {
        if let Some(rects) = &self.all_pages {
            return Ok(Some(AreaMap::EveryPage(rects.iter().map(to_region).collect())));
        }
        if let Some(pages) = &self.pages {
            let mut map = BTreeMap::new();
            for (key, rects) in pages {
                let page: usize = key
                    .parse()
                    .with_context(|| format!("page key {key:?} is not an index"))?;
                map.insert(page, rects.iter().map(to_region).collect());
            }
            return Ok(Some(AreaMap::PerPage(map)));
        }
        Ok(None)
    }

    pub fn to_options(&self) -> Result<CustomOptions> {
        let areas = self.area_map()?;
        if areas.is_none() {
            bail!("job file defines no areas (set all_pages or [pages.N])");
        }
        Ok(CustomOptions {
            areas,
            strategy: if self.grid_lines {
                TableStrategy::Lines
            } else {
                TableStrategy::Text
            },
            use_ocr: self.use_ocr,
            merge_multiline: self.merge_multiline,
            skip_rows: self.skip_rows,
            headers: self.headers.clone(),
            column_indices: self.columns.clone(),
        })
    }
}

fn to_region(rect: &[f64; 4]) -> Region {
    Region::new(rect[0], rect[1], rect[2], rect[3])
}
