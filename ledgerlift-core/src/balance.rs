//! Debit/credit inference from the running balance.
//!
//! Statements preserve the identity `balance[n] = balance[n-1] - debit[n] +
//! credit[n]`, which is more robust than column position once the text has
//! been flattened. When no previous balance exists the resolver falls back
//! to amount-count heuristics and textual `CR`/`CREDIT` markers.

/// Tolerance for the two-amount disambiguation probe: with exactly two
/// amounts `(value, balance)`, the side is chosen by testing the identity
/// within this window. Independent of the cent-exact delta rounding below.
pub const TWO_AMOUNT_TOLERANCE: f64 = 1.0;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Per-layout knobs for amount classification.
#[derive(Debug, Clone, Copy)]
pub struct BalanceRules {
    /// Classify via the change in running balance once it is seeded.
    pub use_delta: bool,
    /// With exactly two amounts and a known previous balance, probe
    /// `prev - value == balance` / `prev + value == balance` within
    /// [`TWO_AMOUNT_TOLERANCE`] to pick the side.
    pub two_amount_probe: bool,
    /// Use a textual `CR`/`CREDIT` marker to pick the side when position
    /// alone cannot.
    pub marker_fallback: bool,
    /// A lone amount is the balance column, not the transaction value.
    pub single_amount_is_balance: bool,
}

impl Default for BalanceRules {
    fn default() -> Self {
        Self {
            use_delta: true,
            two_amount_probe: false,
            marker_fallback: true,
            single_amount_is_balance: false,
        }
    }
}

/// Classified amounts for one transaction line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub debit: f64,
    pub credit: f64,
    pub balance: f64,
    /// Index (into the line's amount list) of the first token consumed as a
    /// column value; description text ends where this token starts.
    pub first_consumed: usize,
}

/// The single mutable value carried across all lines of one conversion.
///
/// Never reset once established: some layouts span page breaks without
/// restating the balance.
#[derive(Debug, Clone, Default)]
pub struct RunningBalance {
    current: Option<f64>,
}

impl RunningBalance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<f64> {
        self.current
    }

    /// Seed from an opening-balance marker line (or any resolved line).
    pub fn seed(&mut self, balance: f64) {
        self.current = Some(balance);
    }

    /// Classify the amounts of one line as (debit, credit, balance).
    ///
    /// The last amount is taken as the printed running balance and becomes
    /// the previous balance for the next line — except in marker-fallback
    /// layouts where a lone amount is the transaction value itself, in which
    /// case no balance is printed and the state is left untouched. `line` is
    /// consulted only for textual `CR`/`CREDIT` markers.
    pub fn resolve(&mut self, rules: &BalanceRules, amounts: &[f64], line: &str) -> Resolution {
        let n = amounts.len();
        if n == 0 {
            return Resolution { debit: 0.0, credit: 0.0, balance: 0.0, first_consumed: 0 };
        }

        let last = amounts[n - 1];
        let mut debit = 0.0;
        let mut credit = 0.0;
        let mut balance = last;
        let mut seed = true;
        let mut first_consumed = n - 1;

        match self.current {
            Some(prev) if rules.use_delta => {
                let delta = round2(prev - balance);
                if delta > 0.0 {
                    debit = delta;
                } else if delta < 0.0 {
                    credit = -delta;
                }
                first_consumed = n.saturating_sub(2);
            }
            Some(prev) if rules.two_amount_probe && n == 2 => {
                let value = amounts[0];
                if (prev - value - balance).abs() < TWO_AMOUNT_TOLERANCE {
                    debit = value;
                } else if (prev + value - balance).abs() < TWO_AMOUNT_TOLERANCE {
                    credit = value;
                } else {
                    debit = value;
                }
                first_consumed = 0;
            }
            _ => {
                // Count-based inference: no balance history (or a purely
                // positional layout).
                if n >= 3 {
                    debit = amounts[n - 3];
                    credit = amounts[n - 2];
                    first_consumed = n - 3;
                } else if n == 2 {
                    let value = amounts[0];
                    first_consumed = 0;
                    if rules.marker_fallback {
                        if is_credit_marked(line) {
                            credit = value;
                        } else {
                            debit = value;
                        }
                    } else if rules.two_amount_probe {
                        // Probe layout before any balance is known.
                        debit = value;
                    }
                    // Otherwise: cannot infer, both stay zero.
                } else if !rules.single_amount_is_balance && rules.marker_fallback {
                    // Lone amount is the transaction value; no balance on
                    // this line.
                    if is_credit_marked(line) {
                        credit = last;
                    } else {
                        debit = last;
                    }
                    balance = 0.0;
                    seed = false;
                }
                // A lone amount otherwise reads as the balance column.
            }
        }

        if seed {
            self.current = Some(balance);
        }
        Resolution { debit, credit, balance, first_consumed }
    }
}

fn is_credit_marked(line: &str) -> bool {
    let upper = line.to_uppercase();
    upper.contains("CR") || upper.contains("CREDIT")
}
