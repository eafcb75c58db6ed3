//! Lazily derive candidate FAQ records from sheet rows.
//!
//! Rows lacking a question or an answer are skipped without error: messy
//! spreadsheets are expected and the import keeps whatever rows are usable.

use std::slice;

use serde::Serialize;

use super::header::ColumnMap;
use super::sheet::{Cell, Row};
use crate::faq::{FaqStatus, NewFaq};

/// A row that passed the presence checks but is not persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateRecord {
    pub category: String,
    pub question: String,
    pub answer: String,
    pub status: FaqStatus,
}

impl CandidateRecord {
    pub fn into_new_faq(self) -> NewFaq {
        NewFaq {
            category: self.category,
            question: self.question,
            answer: self.answer,
            status: self.status,
        }
    }
}

/// Iterator over the candidate records of a row slice.
///
/// Holds no state beyond its position, so extracting again from the same
/// rows yields the same sequence.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    rows: slice::Iter<'a, Row>,
    columns: ColumnMap,
}

impl Iterator for Candidates<'_> {
    type Item = CandidateRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let columns = self.columns;
        self.rows
            .by_ref()
            .find_map(|row| candidate_from_row(row, &columns))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.rows.len()))
    }
}

/// Candidates from the data rows (everything after the header).
pub fn extract_candidates<'a>(rows: &'a [Row], columns: &ColumnMap) -> Candidates<'a> {
    Candidates {
        rows: rows.iter(),
        columns: *columns,
    }
}

fn candidate_from_row(row: &[Cell], columns: &ColumnMap) -> Option<CandidateRecord> {
    let question = cell_text(row, columns.question)?;
    let answer = cell_text(row, columns.answer)?;
    let category = columns
        .category
        .and_then(|index| cell_text(row, index))
        .unwrap_or_default();

    Some(CandidateRecord {
        category,
        question,
        answer,
        status: FaqStatus::Active,
    })
}

/// Trimmed text of the cell at `index`; `None` if missing or blank.
fn cell_text(row: &[Cell], index: usize) -> Option<String> {
    row.get(index)
        .filter(|cell| cell.is_present())
        .map(|cell| cell.to_text().trim().to_string())
}
