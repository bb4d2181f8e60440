//! Money-shaped token scanning.
//!
//! Statement text has no column boundaries, so amounts are located by shape:
//! an optional comma-grouped integer part followed by exactly two decimal
//! digits (`12,345.67`, `0.00`). Currency symbols and `Cr`/`Dr` markers may
//! surround a token without breaking detection.

use regex::Regex;
use std::sync::LazyLock;

static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[\d,]*\d)\.\d{2}").expect("amount pattern"));

/// A monetary amount found in a line: the source substring, its cleaned
/// numeric value, and its byte offset within the line.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountToken {
    pub text: String,
    pub value: f64,
    pub start: usize,
}

impl AmountToken {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Scan a line for amount-shaped tokens, left to right.
///
/// An empty result means the row has no parseable amount; callers either
/// skip the line or emit a degenerate record.
pub fn find_amounts(line: &str) -> Vec<AmountToken> {
    AMOUNT_RE
        .find_iter(line)
        .map(|m| AmountToken {
            text: m.as_str().to_string(),
            value: clean_amount(m.as_str()),
            start: m.start(),
        })
        .collect()
}

/// Clean a currency string (e.g. `"1,200.00 Cr"`) into a float.
///
/// `-` and empty map to 0.0; any conversion failure yields 0.0 rather than
/// an error, so a garbled cell never aborts a row.
pub fn clean_amount(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return 0.0;
    }
    let cleaned = trimmed
        .replace(',', "")
        .replace("Cr", "")
        .replace("Dr", "")
        .replace("Rs.", "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse().unwrap_or(0.0)
}
