//! ledgerlift-ingest: the statement reconstruction engine over extraction
//! collaborators (text, words, page images, OCR).

pub mod convert;
pub mod ocr;
pub mod profile;
pub mod rows;
pub mod source;

pub use convert::{CustomOptions, convert_custom, convert_statement, statement_records};
pub use ocr::{BINARIZE_THRESHOLD, OCR_RENDER_SCALE, ocr_region};
pub use profile::{LayoutProfile, PreDateText};
pub use rows::RowBuilder;
pub use source::{OcrEngine, PageSource, TableStrategy};
