//! Tabular output handed to the file-writing collaborator.

use serde::{Deserialize, Serialize};

/// A scalar output value. Numbers are kept typed so the writer can emit
/// them as numbers; reference codes with leading zeros stay text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
}

/// Ordered headers plus ordered rows; every row has `headers.len()` cells
/// once post-processing has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl OutputTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
