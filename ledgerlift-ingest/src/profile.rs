//! Issuer layout profiles.
//!
//! Statements share one shape — date, description, amounts, running
//! balance — but issuers differ in date anchoring, opening-balance markers,
//! value-date and cheque-number placement, and how debit/credit must be
//! inferred. Each difference is a field here; the classifier and resolver
//! are shared and parameterized by a profile instead of duplicated per
//! issuer.

use ledgerlift_core::{BalanceRules, Column, DateAnchor};

/// What to do with text printed before the transaction date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreDateText {
    Ignore,
    /// It is a transaction/serial number: capture as the reference.
    Reference,
    /// Prepend it to the description.
    Description,
}

#[derive(Debug, Clone)]
pub struct LayoutProfile {
    pub name: &'static str,
    pub anchor: DateAnchor,
    /// Case-insensitive markers of a non-transactional balance line.
    pub opening_markers: &'static [&'static str],
    /// Emit the opening-balance line as a record (vs. only seeding the
    /// running balance).
    pub emit_opening_record: bool,
    /// A value date may follow the transaction date.
    pub value_date: bool,
    /// A cheque number or placeholder (`NA`, `N.A.`, `-`, multi-digit
    /// number) may lead the description.
    pub leading_cheque: bool,
    /// A cheque number (≥3 digits) may trail the description.
    pub trailing_cheque: bool,
    pub pre_date: PreDateText,
    /// Description ends at the first *consumed* amount rather than the
    /// first amount-shaped token on the line.
    pub desc_to_first_consumed: bool,
    pub rules: BalanceRules,
    /// Substrings marking boilerplate lines never appended as continuation.
    pub boilerplate: &'static [&'static str],
    pub columns: &'static [Column],
}

const FULL_COLUMNS: &[Column] = &[
    Column::TxnDate,
    Column::ValueDate,
    Column::Description,
    Column::RefNo,
    Column::Debit,
    Column::Credit,
    Column::Balance,
];

const COMPACT_COLUMNS: &[Column] = &[
    Column::TxnDate,
    Column::Description,
    Column::Debit,
    Column::Credit,
    Column::Balance,
];

impl LayoutProfile {
    /// Balance-delta layout with an explicit opening-balance row, leading
    /// cheque column and trailing branch code.
    pub fn axis() -> Self {
        Self {
            name: "axis",
            anchor: DateAnchor::LineStart,
            opening_markers: &["OPENING BALANCE"],
            emit_opening_record: true,
            value_date: false,
            leading_cheque: true,
            trailing_cheque: false,
            pre_date: PreDateText::Ignore,
            desc_to_first_consumed: false,
            rules: BalanceRules {
                use_delta: true,
                two_amount_probe: false,
                marker_fallback: false,
                single_amount_is_balance: false,
            },
            boilerplate: &["OPENING BALANCE", "Statement", "Page"],
            columns: &[
                Column::TxnDate,
                Column::ChequeNo,
                Column::Description,
                Column::Debit,
                Column::Credit,
                Column::Balance,
                Column::Branch,
            ],
        }
    }

    /// Dedicated debit/credit columns, value date after the transaction
    /// date.
    pub fn hdfc() -> Self {
        Self {
            name: "hdfc",
            anchor: DateAnchor::LineStart,
            opening_markers: &[],
            emit_opening_record: false,
            value_date: true,
            leading_cheque: false,
            trailing_cheque: false,
            pre_date: PreDateText::Ignore,
            desc_to_first_consumed: true,
            rules: BalanceRules {
                use_delta: false,
                two_amount_probe: false,
                marker_fallback: true,
                single_amount_is_balance: false,
            },
            boilerplate: &["Statement", "Page", "HDFC BANK", "Balance"],
            columns: FULL_COLUMNS,
        }
    }

    /// Balance-delta layout; `BROUGHT FORWARD` seeds the balance.
    pub fn sbi() -> Self {
        Self {
            name: "sbi",
            anchor: DateAnchor::LineStart,
            opening_markers: &["BROUGHT FORWARD", "OPENING BALANCE"],
            emit_opening_record: false,
            value_date: true,
            leading_cheque: false,
            trailing_cheque: false,
            pre_date: PreDateText::Ignore,
            desc_to_first_consumed: false,
            rules: BalanceRules {
                use_delta: true,
                two_amount_probe: false,
                marker_fallback: false,
                single_amount_is_balance: false,
            },
            boilerplate: &["Statement"],
            columns: FULL_COLUMNS,
        }
    }

    /// Transaction number before the date; two-amount rows disambiguated by
    /// probing the previous balance; a lone amount is the balance column.
    pub fn pnb() -> Self {
        Self {
            name: "pnb",
            anchor: DateAnchor::Anywhere,
            opening_markers: &[],
            emit_opening_record: false,
            value_date: false,
            leading_cheque: false,
            trailing_cheque: true,
            pre_date: PreDateText::Reference,
            desc_to_first_consumed: false,
            rules: BalanceRules {
                use_delta: false,
                two_amount_probe: true,
                marker_fallback: false,
                single_amount_is_balance: true,
            },
            boilerplate: &["Page", "Statement", "Balance", "Txn No"],
            columns: FULL_COLUMNS,
        }
    }

    pub fn kotak() -> Self {
        Self {
            name: "kotak",
            anchor: DateAnchor::LineStart,
            opening_markers: &["OPENING BALANCE"],
            emit_opening_record: false,
            value_date: false,
            leading_cheque: false,
            trailing_cheque: false,
            pre_date: PreDateText::Ignore,
            desc_to_first_consumed: false,
            rules: BalanceRules {
                use_delta: true,
                two_amount_probe: false,
                marker_fallback: false,
                single_amount_is_balance: false,
            },
            boilerplate: &["Statement", "Page"],
            columns: COMPACT_COLUMNS,
        }
    }

    /// Like kotak; dates usually `DD-MON-YYYY`.
    pub fn canara() -> Self {
        Self {
            name: "canara",
            ..Self::kotak()
        }
    }

    pub fn yes() -> Self {
        Self {
            name: "yes",
            ..Self::kotak()
        }
    }

    /// Robust fallback for unrecognized issuers: date anywhere in the line,
    /// positional amount mapping with CR/CREDIT markers, pre-date text kept
    /// in the description.
    pub fn generic() -> Self {
        Self {
            name: "generic",
            anchor: DateAnchor::Anywhere,
            opening_markers: &["OPENING BALANCE", "BROUGHT FORWARD"],
            emit_opening_record: false,
            value_date: false,
            leading_cheque: false,
            trailing_cheque: false,
            pre_date: PreDateText::Description,
            desc_to_first_consumed: true,
            rules: BalanceRules {
                use_delta: false,
                two_amount_probe: false,
                marker_fallback: true,
                single_amount_is_balance: false,
            },
            boilerplate: &["Page", "Statement", "Balance"],
            columns: FULL_COLUMNS,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::axis(),
            Self::hdfc(),
            Self::sbi(),
            Self::pnb(),
            Self::kotak(),
            Self::canara(),
            Self::yes(),
            Self::generic(),
        ]
    }

    pub fn by_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.header().to_string()).collect()
    }
}
