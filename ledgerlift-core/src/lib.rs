//! ledgerlift-core: primitives of the statement reconstruction engine.
//!
//! Everything here is pure: amount and date scanning, debit/credit
//! inference from the running balance, region geometry for column mode,
//! and post-processing of accumulated rows. Extraction and OCR live behind
//! traits in `ledgerlift-ingest`.

pub mod amount;
pub mod balance;
pub mod date;
pub mod postprocess;
pub mod record;
pub mod region;
pub mod table;

pub use amount::{AmountToken, clean_amount, find_amounts};
pub use balance::{BalanceRules, Resolution, RunningBalance, TWO_AMOUNT_TOLERANCE};
pub use date::{DateAnchor, DateMatch, find_date};
pub use postprocess::{PostProcessOptions, coerce_cell, post_process};
pub use record::{Column, TransactionRecord};
pub use region::{AreaMap, Region, RowGroup, Word, group_rows, merge_words};
pub use table::{Cell, OutputTable};
