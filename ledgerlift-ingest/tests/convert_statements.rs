//! End-to-end conversion tests against mock extraction collaborators.

use anyhow::{Result, bail};
use image::{DynamicImage, GrayImage};
use ledgerlift_core::{AreaMap, Cell, Region, Word};
use ledgerlift_ingest::{
    CustomOptions, LayoutProfile, OcrEngine, PageSource, TableStrategy, convert_custom,
    convert_statement, statement_records,
};

#[derive(Default)]
struct MockPage {
    text: Option<String>,
    words: Vec<Word>,
    fail_text: bool,
}

#[derive(Default)]
struct MockSource {
    pages: Vec<MockPage>,
}

impl MockSource {
    fn from_texts(texts: &[&str]) -> Self {
        Self {
            pages: texts
                .iter()
                .map(|t| MockPage { text: Some(t.to_string()), ..Default::default() })
                .collect(),
        }
    }
}

impl PageSource for MockSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn text(&self, page: usize, _region: Option<&Region>) -> Result<Option<String>> {
        let p = &self.pages[page];
        if p.fail_text {
            bail!("extraction exploded on page {page}");
        }
        Ok(p.text.clone())
    }

    fn words(&self, page: usize, region: &Region) -> Result<Vec<Word>> {
        Ok(self.pages[page]
            .words
            .iter()
            .filter(|w| {
                let mid = (w.top + w.bottom) / 2.0;
                w.x0 >= region.x0 && w.x0 <= region.x1 && mid >= region.y0 && mid <= region.y1
            })
            .cloned()
            .collect())
    }

    fn table(
        &self,
        page: usize,
        _region: &Region,
        _strategy: TableStrategy,
    ) -> Result<Vec<Vec<String>>> {
        let Some(text) = &self.pages[page].text else {
            return Ok(Vec::new());
        };
        Ok(text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.split("  ").map(|c| c.trim().to_string()).collect())
            .collect())
    }

    fn render(&self, _page: usize, _scale: f64) -> Result<DynamicImage> {
        Ok(DynamicImage::new_luma8(600, 800))
    }
}

struct CannedOcr(&'static str);

impl OcrEngine for CannedOcr {
    fn recognize(&self, _image: &GrayImage) -> Result<String> {
        Ok(self.0.to_string())
    }
}

struct BrokenOcr;

impl OcrEngine for BrokenOcr {
    fn recognize(&self, _image: &GrayImage) -> Result<String> {
        bail!("tesseract missing")
    }
}

fn text(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Number(n) => n.to_string(),
    }
}

#[test]
fn test_scenario_credit_inferred_from_balance_rise() {
    let source = MockSource::from_texts(&[
        "OPENING BALANCE 10,000.00\n01/01/2024 SALARY CREDIT 5,000.00 15,000.00",
    ]);
    let records = statement_records(&source, &LayoutProfile::axis(), None);
    // Opening record plus the transaction.
    assert_eq!(records.len(), 2);
    let txn = &records[1];
    assert_eq!(txn.debit, 0.0);
    assert_eq!(txn.credit, 5_000.0);
    assert_eq!(txn.balance, 15_000.0);
}

#[test]
fn test_scenario_debit_inferred_from_balance_fall() {
    let source = MockSource::from_texts(&[
        "OPENING BALANCE 15,000.00\n02/01/2024 ATM WDL 2,000.00 13,000.00",
    ]);
    let records = statement_records(&source, &LayoutProfile::axis(), None);
    let txn = records.last().unwrap();
    assert_eq!(txn.debit, 2_000.0);
    assert_eq!(txn.credit, 0.0);
    assert_eq!(txn.balance, 13_000.0);
}

#[test]
fn test_scenario_positional_fallback_without_history() {
    let source = MockSource::from_texts(&["03/01/2024 FEE 100.00 0.00 12,900.00"]);
    let records = statement_records(&source, &LayoutProfile::generic(), None);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].debit, 100.0);
    assert_eq!(records[0].credit, 0.0);
    assert_eq!(records[0].balance, 12_900.0);
}

#[test]
fn test_round_trip_balance_property() {
    // balance[i] = balance[i-1] - d[i] + c[i]; the resolver must recover
    // every (d, c) exactly.
    let declared = [
        (1_234.56_f64, 0.0_f64),
        (0.0, 999.99),
        (0.01, 0.0),
        (0.0, 10_000.00),
        (5_432.10, 0.0),
    ];
    let mut balance = 20_000.00_f64;
    let mut lines = vec![format!("OPENING BALANCE {balance:.2}")];
    for (i, (d, c)) in declared.iter().enumerate() {
        balance = ((balance - d + c) * 100.0).round() / 100.0;
        lines.push(format!("0{}/01/2024 TXN {balance:.2}", i + 1));
    }
    let page = lines.join("\n");
    let source = MockSource::from_texts(&[&page]);
    let records = statement_records(&source, &LayoutProfile::kotak(), None);
    assert_eq!(records.len(), declared.len());
    for (rec, (d, c)) in records.iter().zip(declared) {
        assert_eq!((rec.debit, rec.credit), (d, c), "mismatch in {rec:?}");
    }
}

#[test]
fn test_continuation_lines_never_add_rows() {
    let source = MockSource::from_texts(&[
        "OPENING BALANCE 1,000.00\n01/01/2024 NEFT 200.00 800.00\nFROM ACME\nCORP LTD",
    ]);
    let records = statement_records(&source, &LayoutProfile::kotak(), None);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].description, "NEFT FROM ACME CORP LTD");
}

#[test]
fn test_extraction_failure_skips_page_only() {
    let mut source = MockSource::from_texts(&[
        "OPENING BALANCE 1,000.00",
        "ignored",
        "01/01/2024 POS 100.00 900.00",
    ]);
    source.pages[1].fail_text = true;
    let records = statement_records(&source, &LayoutProfile::kotak(), None);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].debit, 100.0);
}

#[test]
fn test_empty_input_yields_empty_table() {
    let source = MockSource::from_texts(&["Dear customer, no transactions this period."]);
    let table = convert_statement(&source, &LayoutProfile::generic(), None);
    assert!(table.rows.is_empty());
    // Headers still present for the writer.
    assert_eq!(table.headers.len(), LayoutProfile::generic().columns.len());
}

#[test]
fn test_statement_table_projection() {
    let source = MockSource::from_texts(&[
        "OPENING BALANCE 10,000.00\n01/01/2024 123456 SALARY 5,000.00 15,000.00 HQ",
    ]);
    let table = convert_statement(&source, &LayoutProfile::axis(), None);
    assert_eq!(table.headers[0], "Txn Date");
    let txn = &table.rows[1];
    assert_eq!(text(&txn[0]), "01/01/2024");
    assert_eq!(text(&txn[1]), "123456"); // cheque number
    assert_eq!(text(&txn[2]), "SALARY");
    assert_eq!(txn[4], Cell::Number(5_000.0));
    assert_eq!(text(&txn[6]), "HQ");
}

#[test]
fn test_column_mode_merges_side_by_side_regions() {
    // Two regions overlapping in Y: columns of one table.
    let mut source = MockSource::default();
    source.pages.push(MockPage {
        words: vec![
            Word { text: "04/01/2024".into(), x0: 10.0, top: 100.0, bottom: 110.0, col: 0 },
            Word { text: "7,500.00".into(), x0: 120.0, top: 101.0, bottom: 111.0, col: 0 },
            Word { text: "20,400.00".into(), x0: 170.0, top: 101.0, bottom: 111.0, col: 0 },
        ],
        ..Default::default()
    });
    let opts = CustomOptions {
        areas: Some(AreaMap::EveryPage(vec![
            Region::new(0.0, 90.0, 100.0, 400.0),
            Region::new(110.0, 95.0, 300.0, 395.0),
        ])),
        ..Default::default()
    };
    let table = convert_custom(&source, None, &opts);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(text(&table.rows[0][0]), "04/01/2024");
    assert_eq!(text(&table.rows[0][1]), "7,500.00 20,400.00");
}

#[test]
fn test_custom_single_area_with_headers_and_skip() {
    let source = MockSource::from_texts(&[
        "Date  Description  Amount\n01/01/2024  POS PURCHASE  1,500.00\n  CONTINUED NARRATION",
    ]);
    let opts = CustomOptions {
        areas: Some(AreaMap::EveryPage(vec![Region::new(0.0, 0.0, 600.0, 800.0)])),
        merge_multiline: true,
        skip_rows: 1,
        headers: Some(vec!["Date".into(), "Narration".into(), "Amount".into()]),
        ..Default::default()
    };
    let table = convert_custom(&source, None, &opts);
    assert_eq!(table.headers, vec!["Date", "Narration", "Amount"]);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(text(&table.rows[0][1]), "POS PURCHASE CONTINUED NARRATION");
    assert_eq!(table.rows[0][2], Cell::Number(1_500.0));
    for row in &table.rows {
        assert_eq!(row.len(), table.headers.len());
    }
}

#[test]
fn test_ocr_path_produces_rows() {
    let mut source = MockSource::default();
    source.pages.push(MockPage::default());
    let ocr = CannedOcr("01/01/2024  UPI PAYMENT  250.00\n02/01/2024  REFUND  99.00\n");
    let opts = CustomOptions {
        areas: Some(AreaMap::EveryPage(vec![Region::new(0.0, 0.0, 200.0, 200.0)])),
        use_ocr: true,
        ..Default::default()
    };
    let table = convert_custom(&source, Some(&ocr), &opts);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(text(&table.rows[1][1]), "REFUND");
    assert_eq!(table.rows[1][2], Cell::Number(99.0));
}

#[test]
fn test_ocr_failure_yields_empty_table_not_error() {
    let mut source = MockSource::default();
    source.pages.push(MockPage::default());
    let opts = CustomOptions {
        areas: Some(AreaMap::EveryPage(vec![Region::new(0.0, 0.0, 200.0, 200.0)])),
        use_ocr: true,
        ..Default::default()
    };
    let table = convert_custom(&source, Some(&BrokenOcr), &opts);
    assert!(table.rows.is_empty());
}

#[test]
fn test_leading_zero_reference_survives_coercion() {
    let source = MockSource::from_texts(&["0004521  CHQ PAID  2,000.00"]);
    let opts = CustomOptions {
        areas: Some(AreaMap::EveryPage(vec![Region::new(0.0, 0.0, 600.0, 800.0)])),
        ..Default::default()
    };
    let table = convert_custom(&source, None, &opts);
    assert_eq!(table.rows[0][0], Cell::Text("0004521".into()));
    assert_eq!(table.rows[0][2], Cell::Number(2_000.0));
}
