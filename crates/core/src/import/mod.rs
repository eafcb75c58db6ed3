//! Spreadsheet import of FAQ entries.
//!
//! The flow is parse -> resolve header -> extract candidates -> commit:
//!
//! - [`sheet`] reads CSV or workbook bytes into positional rows.
//! - [`header`] locates the `category` / `question` / `answer` columns.
//! - [`candidates`] lazily filters rows into candidate records.
//! - [`reconcile`] commits candidates as one batch and reports the outcome.
//! - [`template`] builds the downloadable template workbook.

pub mod candidates;
pub mod header;
pub mod reconcile;
pub mod sheet;
pub mod template;

pub use candidates::{extract_candidates, CandidateRecord, Candidates};
pub use header::{resolve_header, ColumnMap, HeaderError};
pub use reconcile::{
    commit, run_import, CommitReport, ImportError, ImportOutcome, ImportReport, OutcomeKind,
};
pub use sheet::{parse_sheet, Cell, ParseError, Row, SheetFormat};
pub use template::{faq_template_xlsx, TEMPLATE_CONTENT_TYPE, TEMPLATE_FILE_NAME};
