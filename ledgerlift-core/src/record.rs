//! Normalized output of the reconstruction engine (issuer-agnostic).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::table::Cell;

/// One reconstructed statement row.
///
/// Dates are kept as raw strings exactly as found; issuers disagree on
/// format and the raw text is what downstream spreadsheets expect. At most
/// one of `debit`/`credit` is non-zero under normal resolution; both are
/// zero when the originating line carried no amount token at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub txn_date: String,
    pub value_date: Option<String>,
    pub description: String,
    /// Cheque or transaction reference number.
    pub reference: Option<String>,
    pub debit: f64,
    pub credit: f64,
    pub balance: f64,
    /// Trailing branch/code field printed after the balance.
    pub branch: Option<String>,
}

impl TransactionRecord {
    /// A record with everything empty; the row builder fills it in.
    pub fn empty() -> Self {
        Self {
            txn_date: String::new(),
            value_date: None,
            description: String::new(),
            reference: None,
            debit: 0.0,
            credit: 0.0,
            balance: 0.0,
            branch: None,
        }
    }

    /// Best-effort normalization of the raw transaction date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        // Two-digit-year formats go first: `%y` rejects a 4-digit year
        // (trailing digits remain), while `%Y` would swallow a 2-digit one
        // as year 00NN.
        const FORMATS: [&str; 6] = [
            "%d/%m/%y", "%d-%m-%y", "%d-%b-%y", "%d/%m/%Y", "%d-%m-%Y", "%d-%b-%Y",
        ];
        FORMATS
            .iter()
            .find_map(|f| NaiveDate::parse_from_str(&self.txn_date, f).ok())
    }
}

/// One emitted column of a layout's output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Column {
    TxnDate,
    ValueDate,
    ChequeNo,
    Description,
    RefNo,
    Debit,
    Credit,
    Balance,
    Branch,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::TxnDate => "Txn Date",
            Column::ValueDate => "Value Date",
            Column::ChequeNo => "Chq No",
            Column::Description => "Description",
            Column::RefNo => "Ref No.",
            Column::Debit => "Debit",
            Column::Credit => "Credit",
            Column::Balance => "Balance",
            Column::Branch => "Branch Code",
        }
    }

    /// Project one cell of a record.
    pub fn cell(&self, rec: &TransactionRecord) -> Cell {
        match self {
            Column::TxnDate => Cell::Text(rec.txn_date.clone()),
            Column::ValueDate => Cell::Text(rec.value_date.clone().unwrap_or_default()),
            Column::ChequeNo | Column::RefNo => {
                Cell::Text(rec.reference.clone().unwrap_or_default())
            }
            Column::Description => Cell::Text(rec.description.clone()),
            Column::Debit => Cell::Number(rec.debit),
            Column::Credit => Cell::Number(rec.credit),
            Column::Balance => Cell::Number(rec.balance),
            Column::Branch => Cell::Text(rec.branch.clone().unwrap_or_default()),
        }
    }
}
