//! Date-shaped token detection.
//!
//! Supported shapes: `DD/MM/YYYY`, `DD-MM-YYYY`, `DD-MON-YYYY`, with 2- or
//! 4-digit years. Some issuers put the date at the very start of the line;
//! others print a transaction number first, so both anchored and search
//! matching are supported and selected per layout profile.

use regex::Regex;
use std::sync::LazyLock;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}[/-](?:\d{2}|[A-Za-z]{3})[/-]\d{2,4}").expect("date pattern"));

/// Where a date token is allowed to appear in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAnchor {
    /// Date must be the first token on the line.
    LineStart,
    /// Date may appear anywhere (e.g. preceded by a transaction number).
    Anywhere,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateMatch {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Locate the first date-shaped token in `line` under the given anchor mode.
pub fn find_date(line: &str, anchor: DateAnchor) -> Option<DateMatch> {
    let m = match anchor {
        DateAnchor::LineStart => DATE_RE.find(line).filter(|m| m.start() == 0)?,
        DateAnchor::Anywhere => DATE_RE.find(line)?,
    };
    Some(DateMatch {
        text: m.as_str().to_string(),
        start: m.start(),
        end: m.end(),
    })
}
