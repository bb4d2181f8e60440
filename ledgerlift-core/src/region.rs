//! Region geometry for column mode.
//!
//! When a layout cannot be parsed as flat text, the caller draws rectangular
//! areas per page. Areas that overlap substantially on the Y axis are
//! side-by-side columns of one logical table and must be merged back into
//! aligned rows; areas with no Y overlap are separate single-area tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Vertical overlap (as a fraction of the shorter region) required to treat
/// two regions as columns of the same row band.
pub const GROUP_OVERLAP_FRACTION: f64 = 0.4;

/// Slack, in page units, around a synthetic row's vertical band when
/// deciding whether a word belongs to it.
pub const ROW_BAND_TOLERANCE: f64 = 3.0;

/// Axis-aligned rectangle in page-coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Region {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Scale all coordinates (used to map page space onto a rendered image).
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            x0: self.x0 * factor,
            y0: self.y0 * factor,
            x1: self.x1 * factor,
            y1: self.y1 * factor,
        }
    }
}

/// Caller-supplied areas: either the same set for every page, or a per-page
/// map. Pages absent from the map contribute no rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AreaMap {
    EveryPage(Vec<Region>),
    PerPage(BTreeMap<usize, Vec<Region>>),
}

impl AreaMap {
    pub fn for_page(&self, page: usize) -> &[Region] {
        match self {
            AreaMap::EveryPage(regions) => regions,
            AreaMap::PerPage(map) => map.get(&page).map(Vec::as_slice).unwrap_or(&[]),
        }
    }
}

/// Regions judged to be the columns of one row band, ordered left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup {
    pub regions: Vec<Region>,
}

impl RowGroup {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Partition a page's regions into row bands.
///
/// Regions are sorted by top edge, then greedily merged: a region joins the
/// current group when its vertical overlap with the group's union bounds
/// exceeds [`GROUP_OVERLAP_FRACTION`] of the shorter height. Members of each
/// group are returned ordered by `x0`. The partition is independent of the
/// input order.
pub fn group_rows(regions: &[Region]) -> Vec<RowGroup> {
    if regions.is_empty() {
        return Vec::new();
    }
    let mut sorted: Vec<Region> = regions.to_vec();
    sorted.sort_by(|a, b| a.y0.total_cmp(&b.y0));

    let mut groups: Vec<Vec<Region>> = Vec::new();
    let mut current = vec![sorted[0]];
    let (mut g_y0, mut g_y1) = (sorted[0].y0, sorted[0].y1);

    for region in &sorted[1..] {
        let overlap = (g_y1.min(region.y1) - g_y0.max(region.y0)).max(0.0);
        let min_height = (g_y1 - g_y0).min(region.height());
        if overlap > GROUP_OVERLAP_FRACTION * min_height {
            current.push(*region);
            g_y0 = g_y0.min(region.y0);
            g_y1 = g_y1.max(region.y1);
        } else {
            groups.push(std::mem::replace(&mut current, vec![*region]));
            g_y0 = region.y0;
            g_y1 = region.y1;
        }
    }
    groups.push(current);

    groups
        .into_iter()
        .map(|mut g| {
            g.sort_by(|a, b| a.x0.total_cmp(&b.x0));
            RowGroup { regions: g }
        })
        .collect()
}

/// A word with its bounding box, tagged with the column (region) index it
/// was extracted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub x0: f64,
    pub top: f64,
    pub bottom: f64,
    #[serde(default)]
    pub col: usize,
}

/// Merge words from all columns of a row group into synthetic rows.
///
/// Words are taken in vertical order; a new row starts when a word's
/// vertical midpoint falls outside the current row's accumulated band
/// (±[`ROW_BAND_TOLERANCE`]). Within a row, words sharing a column index are
/// joined left to right. Every row has exactly `cols` cells; columns with no
/// words render as empty strings.
pub fn merge_words(mut words: Vec<Word>, cols: usize) -> Vec<Vec<String>> {
    if words.is_empty() {
        return Vec::new();
    }
    words.sort_by(|a, b| a.top.total_cmp(&b.top));

    let mut rows = Vec::new();
    let mut current: Vec<Word> = Vec::new();
    let (mut row_top, mut row_bottom) = (words[0].top, words[0].bottom);

    for word in words {
        let mid = (word.top + word.bottom) / 2.0;
        if current.is_empty()
            || (row_top - ROW_BAND_TOLERANCE <= mid && mid <= row_bottom + ROW_BAND_TOLERANCE)
        {
            row_bottom = row_bottom.max(word.bottom);
            current.push(word);
        } else {
            rows.push(build_row(&current, cols));
            row_top = word.top;
            row_bottom = word.bottom;
            current = vec![word];
        }
    }
    rows.push(build_row(&current, cols));
    rows
}

fn build_row(words: &[Word], cols: usize) -> Vec<String> {
    let mut row = vec![String::new(); cols];
    let mut by_col: BTreeMap<usize, Vec<&Word>> = BTreeMap::new();
    for w in words {
        by_col.entry(w.col).or_default().push(w);
    }
    for (col, mut ws) in by_col {
        if col >= cols {
            continue;
        }
        ws.sort_by(|a, b| a.x0.total_cmp(&b.x0));
        row[col] = ws.iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join(" ");
    }
    row
}
