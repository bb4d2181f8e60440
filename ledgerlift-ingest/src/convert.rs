//! Conversion drivers.
//!
//! Pages are processed strictly in order: the running balance and the
//! continuation state are sequential dependencies, so nothing here is
//! parallel. A conversion always completes with a (possibly empty) table;
//! a failed page, region, or OCR pass contributes zero rows and is logged.

use ledgerlift_core::{
    AreaMap, OutputTable, PostProcessOptions, TransactionRecord, group_rows, merge_words,
    post_process,
};
use tracing::debug;

use crate::ocr::ocr_region;
use crate::profile::LayoutProfile;
use crate::rows::RowBuilder;
use crate::source::{OcrEngine, PageSource, TableStrategy};

/// Options for custom (caller-drawn areas) conversion.
#[derive(Debug, Clone, Default)]
pub struct CustomOptions {
    pub areas: Option<AreaMap>,
    pub strategy: TableStrategy,
    pub use_ocr: bool,
    pub merge_multiline: bool,
    pub skip_rows: usize,
    pub headers: Option<Vec<String>>,
    /// Keep only these column indices from single-area and OCR rows.
    pub column_indices: Option<Vec<usize>>,
}

/// Profile-driven conversion over whole-page (or single-region) text.
pub fn convert_statement(
    source: &dyn PageSource,
    profile: &LayoutProfile,
    areas: Option<&AreaMap>,
) -> OutputTable {
    let records = statement_records(source, profile, areas);
    let rows = records
        .iter()
        .map(|rec| profile.columns.iter().map(|c| c.cell(rec)).collect())
        .collect();
    OutputTable { headers: profile.headers(), rows }
}

/// The record stream behind [`convert_statement`], for callers that want
/// typed records rather than a table.
pub fn statement_records(
    source: &dyn PageSource,
    profile: &LayoutProfile,
    areas: Option<&AreaMap>,
) -> Vec<TransactionRecord> {
    let mut builder = RowBuilder::new(profile);
    for page in 0..source.page_count() {
        // Single-area parsers crop to the first region drawn for the page.
        let region = areas.and_then(|a| a.for_page(page).first());
        match source.text(page, region) {
            Ok(Some(text)) => builder.feed_text(&text),
            Ok(None) => {}
            Err(err) => debug!(page, error = %err, "text extraction failed, skipping page"),
        }
    }
    builder.finish()
}

/// Area-driven conversion: regions are grouped into row bands; single-area
/// bands go through collaborator table extraction (or OCR), multi-area
/// bands are reassembled from words in column mode. Post-processing runs
/// once over the accumulated rows.
pub fn convert_custom(
    source: &dyn PageSource,
    ocr: Option<&dyn OcrEngine>,
    opts: &CustomOptions,
) -> OutputTable {
    let mut rows: Vec<Vec<String>> = Vec::new();

    for page in 0..source.page_count() {
        let regions = match &opts.areas {
            Some(areas) => areas.for_page(page).to_vec(),
            None => Vec::new(),
        };
        if regions.is_empty() {
            continue;
        }

        for group in group_rows(&regions) {
            if group.len() == 1 {
                let region = &group.regions[0];

                if opts.use_ocr {
                    if let Some(engine) = ocr {
                        rows.extend(ocr_region(
                            source,
                            engine,
                            page,
                            region,
                            opts.column_indices.as_deref(),
                        ));
                        continue;
                    }
                }

                match source.table(page, region, opts.strategy) {
                    Ok(table_rows) => {
                        for row in table_rows {
                            let row = select_columns(row, opts.column_indices.as_deref());
                            if row.iter().any(|c| !c.is_empty()) {
                                rows.push(row);
                            }
                        }
                    }
                    Err(err) => {
                        debug!(page, error = %err, "table extraction failed, skipping region");
                    }
                }
            } else {
                // Column mode: one output column per region, left to right.
                let mut words = Vec::new();
                for (col, region) in group.regions.iter().enumerate() {
                    match source.words(page, region) {
                        Ok(extracted) => words.extend(extracted.into_iter().map(|mut w| {
                            w.col = col;
                            w
                        })),
                        Err(err) => {
                            debug!(page, col, error = %err, "word extraction failed for column");
                        }
                    }
                }
                rows.extend(merge_words(words, group.len()));
            }
        }
    }

    post_process(
        rows,
        &PostProcessOptions {
            merge_multiline: opts.merge_multiline,
            skip_rows: opts.skip_rows,
            headers: opts.headers.clone(),
        },
    )
}

/// Keep a caller-specified subset of columns, positionally; indices past
/// the row's end become empty cells.
pub(crate) fn select_columns(row: Vec<String>, indices: Option<&[usize]>) -> Vec<String> {
    match indices {
        None => row.into_iter().map(|c| c.trim().to_string()).collect(),
        Some(indices) => indices
            .iter()
            .map(|&i| row.get(i).map(|c| c.trim().to_string()).unwrap_or_default())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_columns_passthrough_trims() {
        let row = vec![" a ".to_string(), "b".to_string()];
        assert_eq!(select_columns(row, None), vec!["a", "b"]);
    }

    #[test]
    fn test_select_columns_subset_and_padding() {
        let row = vec!["a".to_string(), "b".to_string()];
        assert_eq!(select_columns(row, Some(&[1, 5])), vec!["b", ""]);
    }
}
