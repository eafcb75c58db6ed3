//! Locate the logical FAQ columns in a sheet's header row.

use super::sheet::Cell;

pub const COLUMN_CATEGORY: &str = "category";
pub const COLUMN_QUESTION: &str = "question";
pub const COLUMN_ANSWER: &str = "answer";

/// Positional index of each logical column. `category` is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub category: Option<usize>,
    pub question: usize,
    pub answer: usize,
}

/// One or more required columns are missing from the header row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required column(s): {}", .missing.join(", "))]
pub struct HeaderError {
    pub missing: Vec<&'static str>,
}

/// Resolve column positions from the header row.
///
/// Names match case-insensitively and exactly (after trimming); column order
/// and extra columns do not matter. The first matching cell wins.
pub fn resolve_header(header: &[Cell]) -> Result<ColumnMap, HeaderError> {
    let category = position(header, COLUMN_CATEGORY);
    let question = position(header, COLUMN_QUESTION);
    let answer = position(header, COLUMN_ANSWER);

    match (question, answer) {
        (Some(question), Some(answer)) => Ok(ColumnMap {
            category,
            question,
            answer,
        }),
        _ => {
            let mut missing = Vec::new();
            if question.is_none() {
                missing.push(COLUMN_QUESTION);
            }
            if answer.is_none() {
                missing.push(COLUMN_ANSWER);
            }
            Err(HeaderError { missing })
        }
    }
}

fn position(header: &[Cell], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|cell| cell.header_name().as_deref() == Some(name))
}
