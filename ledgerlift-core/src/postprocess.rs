//! Post-processing of the accumulated raw rows.
//!
//! Runs exactly once per conversion, in a fixed order: multi-line merge,
//! skip-rows, header reconciliation, numeric coercion.

use crate::table::{Cell, OutputTable};

#[derive(Debug, Clone, Default)]
pub struct PostProcessOptions {
    /// Fold rows whose first cell is empty into the previous row.
    pub merge_multiline: bool,
    /// Drop the first N rows (residual header text captured as data).
    pub skip_rows: usize,
    /// Caller-supplied headers; generated `Column k` labels otherwise.
    pub headers: Option<Vec<String>>,
}

/// Apply the full post-processing pipeline to raw string rows.
pub fn post_process(mut rows: Vec<Vec<String>>, opts: &PostProcessOptions) -> OutputTable {
    if opts.merge_multiline {
        rows = merge_multiline(rows);
    }

    if opts.skip_rows > 0 {
        let n = opts.skip_rows.min(rows.len());
        rows.drain(..n);
    }

    let headers = reconcile_headers(&mut rows, opts.headers.clone());

    let rows = rows
        .into_iter()
        .map(|row| row.iter().map(|cell| coerce_cell(cell)).collect())
        .collect();

    OutputTable { headers, rows }
}

/// A row whose first cell is empty but which has any content is a
/// continuation: its non-empty cells are space-joined onto the matching
/// cells of the previous row and the row itself is dropped.
///
/// Idempotent on input with no blank leading cells.
fn merge_multiline(rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let mut merged: Vec<Vec<String>> = Vec::with_capacity(rows.len());
    for row in rows {
        let is_continuation = row.first().is_some_and(|c| c.is_empty())
            && row.iter().any(|c| !c.is_empty());
        match merged.last_mut() {
            Some(prev) if is_continuation => {
                if prev.len() < row.len() {
                    prev.resize(row.len(), String::new());
                }
                for (k, cell) in row.iter().enumerate() {
                    if !cell.is_empty() {
                        if prev[k].is_empty() {
                            prev[k] = cell.clone();
                        } else {
                            prev[k].push(' ');
                            prev[k].push_str(cell);
                        }
                    }
                }
            }
            _ => merged.push(row),
        }
    }
    merged
}

/// Reconcile header count against the widest row; afterwards every row has
/// exactly `headers.len()` cells.
fn reconcile_headers(rows: &mut [Vec<String>], headers: Option<Vec<String>>) -> Vec<String> {
    let max_cols = rows.iter().map(Vec::len).max().unwrap_or(0);

    let mut headers = match headers {
        Some(h) if !h.is_empty() => h,
        // A conversion that produced no rows still gets one column so the
        // output file is never header-less.
        _ if max_cols == 0 => vec!["No Data".to_string()],
        _ => (1..=max_cols).map(|k| format!("Column {k}")).collect(),
    };
    if headers.len() < max_cols {
        headers.extend((headers.len() + 1..=max_cols).map(|k| format!("Column {k}")));
    }
    for row in rows.iter_mut() {
        row.resize(headers.len(), String::new());
    }
    headers
}

/// Best-effort numeric coercion of a string cell.
///
/// Cells with a leading zero and no decimal point stay text so cheque and
/// reference numbers keep their digits.
pub fn coerce_cell(value: &str) -> Cell {
    let cleaned = value.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Cell::Text(value.to_string());
    }
    if cleaned.starts_with('0') && cleaned.len() > 1 && !cleaned.contains('.') {
        return Cell::Text(value.to_string());
    }
    match cleaned.parse::<f64>() {
        Ok(n) => Cell::Number(n),
        Err(_) => Cell::Text(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_multiline_merge_folds_continuation() {
        let rows = vec![
            s(&["01/01/2024", "NEFT FROM", "100.00"]),
            s(&["", "ACME CORP", ""]),
        ];
        let opts = PostProcessOptions { merge_multiline: true, ..Default::default() };
        let table = post_process(rows, &opts);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][1], Cell::Text("NEFT FROM ACME CORP".into()));
    }

    #[test]
    fn test_multiline_merge_idempotent_without_blanks() {
        let rows = vec![s(&["a", "b"]), s(&["c", "d"])];
        let merged = merge_multiline(rows.clone());
        assert_eq!(merged, rows);
    }

    #[test]
    fn test_fully_empty_row_not_merged() {
        let rows = vec![s(&["a", "b"]), s(&["", ""])];
        let merged = merge_multiline(rows);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_skip_rows() {
        let rows = vec![s(&["header"]), s(&["junk"]), s(&["data"])];
        let opts = PostProcessOptions { skip_rows: 2, ..Default::default() };
        let table = post_process(rows, &opts);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], Cell::Text("data".into()));
    }

    #[test]
    fn test_skip_more_rows_than_present() {
        let opts = PostProcessOptions { skip_rows: 10, ..Default::default() };
        let table = post_process(vec![s(&["only"])], &opts);
        assert!(table.is_empty());
    }

    #[test]
    fn test_empty_result_gets_placeholder_header() {
        let table = post_process(Vec::new(), &PostProcessOptions::default());
        assert!(table.rows.is_empty());
        assert_eq!(table.headers, vec!["No Data"]);
    }

    #[test]
    fn test_empty_result_keeps_caller_headers() {
        let opts = PostProcessOptions {
            headers: Some(s(&["Date", "Desc"])),
            ..Default::default()
        };
        let table = post_process(Vec::new(), &opts);
        assert!(table.rows.is_empty());
        assert_eq!(table.headers, vec!["Date", "Desc"]);
    }

    #[test]
    fn test_generated_headers_match_widest_row() {
        let rows = vec![s(&["a"]), s(&["b", "c", "d"])];
        let table = post_process(rows, &PostProcessOptions::default());
        assert_eq!(table.headers, vec!["Column 1", "Column 2", "Column 3"]);
        for row in &table.rows {
            assert_eq!(row.len(), table.headers.len());
        }
    }

    #[test]
    fn test_short_header_list_extended() {
        let rows = vec![s(&["a", "b", "c"])];
        let opts = PostProcessOptions {
            headers: Some(s(&["Date", "Desc"])),
            ..Default::default()
        };
        let table = post_process(rows, &opts);
        assert_eq!(table.headers, vec!["Date", "Desc", "Column 3"]);
    }

    #[test]
    fn test_long_header_list_pads_rows() {
        let rows = vec![s(&["a"])];
        let opts = PostProcessOptions {
            headers: Some(s(&["Date", "Desc", "Amount"])),
            ..Default::default()
        };
        let table = post_process(rows, &opts);
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][2], Cell::Text(String::new()));
    }

    #[test]
    fn test_coercion() {
        assert_eq!(coerce_cell("1,234.56"), Cell::Number(1234.56));
        assert_eq!(coerce_cell("42"), Cell::Number(42.0));
        assert_eq!(coerce_cell("NEFT"), Cell::Text("NEFT".into()));
        // Leading-zero cheque number stays text.
        assert_eq!(coerce_cell("000123"), Cell::Text("000123".into()));
        // But a decimal with a leading zero is a number.
        assert_eq!(coerce_cell("0.50"), Cell::Number(0.5));
    }
}
