//! Line classifier and row builder.
//!
//! Consumes a document's lines in order and decides, per line: new
//! transaction (date found), opening balance (marker text, no date), or
//! continuation (append to the active record's description). One builder is
//! fed every page of a document so the running balance and the active
//! record survive page breaks. No line ever aborts a page: worst case a
//! line is dropped as boilerplate or appended as continuation text.

use ledgerlift_core::{
    AmountToken, DateAnchor, RunningBalance, TransactionRecord, find_amounts, find_date,
};

use crate::profile::{LayoutProfile, PreDateText};

pub struct RowBuilder<'p> {
    profile: &'p LayoutProfile,
    balance: RunningBalance,
    active: Option<TransactionRecord>,
    rows: Vec<TransactionRecord>,
}

impl<'p> RowBuilder<'p> {
    pub fn new(profile: &'p LayoutProfile) -> Self {
        Self {
            profile,
            balance: RunningBalance::new(),
            active: None,
            rows: Vec::new(),
        }
    }

    pub fn feed_text(&mut self, text: &str) {
        for line in text.lines() {
            self.feed_line(line);
        }
    }

    pub fn feed_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        let date = find_date(line, self.profile.anchor);

        if date.is_none() {
            if let Some(marker) = self.opening_marker(line) {
                self.handle_opening(line, marker);
                return;
            }
        }

        match date {
            Some(date) => {
                // Amounts are scanned after the date so a numeric
                // transaction number before it is never read as money.
                let amounts: Vec<AmountToken> = find_amounts(&line[date.end..])
                    .into_iter()
                    .map(|mut t| {
                        t.start += date.end;
                        t
                    })
                    .collect();

                self.flush_active();
                let record = if amounts.is_empty() {
                    // Degenerate row: keep the raw text so nothing is lost.
                    TransactionRecord {
                        txn_date: date.text.clone(),
                        description: line.to_string(),
                        ..TransactionRecord::empty()
                    }
                } else {
                    self.build_record(line, &date, &amounts)
                };
                self.active = Some(record);
            }
            None => self.continuation(line),
        }
    }

    /// Flush the active record and return all rows in encounter order.
    pub fn finish(mut self) -> Vec<TransactionRecord> {
        self.flush_active();
        self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len() + usize::from(self.active.is_some())
    }

    fn flush_active(&mut self) {
        if let Some(record) = self.active.take() {
            self.rows.push(record);
        }
    }

    fn opening_marker(&self, line: &str) -> Option<&'static str> {
        let upper = line.to_uppercase();
        self.profile
            .opening_markers
            .iter()
            .find(|m| upper.contains(**m))
            .copied()
    }

    fn handle_opening(&mut self, line: &str, marker: &'static str) {
        let amounts = find_amounts(line);
        let Some(last) = amounts.last() else { return };
        self.balance.seed(last.value);

        if self.profile.emit_opening_record {
            self.flush_active();
            let branch = non_empty(line[last.end()..].trim());
            self.active = Some(TransactionRecord {
                description: marker.to_string(),
                balance: last.value,
                branch,
                ..TransactionRecord::empty()
            });
        }
    }

    fn build_record(
        &mut self,
        line: &str,
        date: &ledgerlift_core::DateMatch,
        amounts: &[AmountToken],
    ) -> TransactionRecord {
        let values: Vec<f64> = amounts.iter().map(|t| t.value).collect();
        let res = self.balance.resolve(&self.profile.rules, &values, line);

        let mut desc_start = date.end;
        let mut value_date = None;
        if self.profile.value_date {
            let after = &line[date.end..];
            let trimmed = after.trim_start();
            if let Some(vd) = find_date(trimmed, DateAnchor::LineStart) {
                desc_start = date.end + (after.len() - trimmed.len()) + vd.end;
                value_date = Some(vd.text);
            }
        }

        let boundary = if self.profile.desc_to_first_consumed {
            res.first_consumed
        } else {
            0
        };
        let desc_end = amounts[boundary].start;
        let mut description = if desc_end > desc_start {
            line[desc_start..desc_end].trim().to_string()
        } else {
            String::new()
        };

        let last = amounts.last().expect("amounts non-empty");
        let branch = non_empty(line[last.end()..].trim());

        let mut reference = None;
        match self.profile.pre_date {
            PreDateText::Reference => {
                reference = non_empty(line[..date.start].trim());
            }
            PreDateText::Description => {
                let pre = line[..date.start].trim();
                if !pre.is_empty() {
                    description = if description.is_empty() {
                        pre.to_string()
                    } else {
                        format!("{pre} {description}")
                    };
                }
            }
            PreDateText::Ignore => {}
        }

        if self.profile.leading_cheque {
            if let Some((head, rest)) = split_first_token(&description) {
                if is_cheque_token(head) {
                    reference = Some(head.to_string());
                    description = rest.to_string();
                }
            }
        }

        if self.profile.trailing_cheque {
            if let Some((rest, tail)) = split_last_token(&description) {
                if tail.len() >= 3 && tail.chars().all(|c| c.is_ascii_digit()) {
                    reference = Some(tail.to_string());
                    description = rest.to_string();
                }
            }
        }

        TransactionRecord {
            txn_date: date.text.clone(),
            value_date,
            description,
            reference,
            debit: res.debit,
            credit: res.credit,
            balance: res.balance,
            branch,
        }
    }

    fn continuation(&mut self, line: &str) {
        let Some(active) = self.active.as_mut() else { return };
        if self.profile.boilerplate.iter().any(|b| line.contains(b)) {
            return;
        }
        if !active.description.is_empty() {
            active.description.push(' ');
        }
        active.description.push_str(line);
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn split_first_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    match s.split_once(char::is_whitespace) {
        Some((head, rest)) => Some((head, rest.trim_start())),
        None => Some((s, "")),
    }
}

fn split_last_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    match s.rsplit_once(char::is_whitespace) {
        Some((rest, tail)) => Some((rest.trim_end(), tail)),
        None => Some(("", s)),
    }
}

/// Cheque-number slot: a multi-digit number or a placeholder.
fn is_cheque_token(token: &str) -> bool {
    let upper = token.to_uppercase();
    if matches!(upper.as_str(), "NA" | "N.A." | "-") {
        return true;
    }
    token.len() > 1 && token.chars().all(|c| c.is_ascii_digit())
}
