//! Commit candidate records to a store and report the aggregate outcome.
//!
//! [`commit`] is all-or-nothing: candidates go to the store as one batch and
//! the owner's collection is re-read afterwards instead of trusting a local
//! copy. [`run_import`] is the operation boundary: every failure becomes an
//! [`ImportOutcome`] plus a [`Notice`], nothing escapes as an error.

use serde::Serialize;

use super::candidates::{extract_candidates, CandidateRecord};
use super::header::{resolve_header, HeaderError};
use super::sheet::{parse_sheet, ParseError};
use crate::error::CoreError;
use crate::faq::{FaqRecord, NewFaq};
use crate::notice::{Notice, NotificationSink};
use crate::session::SessionProvider;
use crate::store::{FaqStore, StoreError};
use crate::types::OwnerId;

// ---------------------------------------------------------------------------
// Errors and outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Could not read the uploaded file: {0}")]
    Parse(#[from] ParseError),

    #[error("The header row is invalid, {0}")]
    Header(#[from] HeaderError),

    #[error("Nothing to import: no row has both a question and an answer")]
    EmptyImport,

    #[error("A row failed validation: {0}")]
    InvalidRows(#[source] CoreError),

    #[error("The record store rejected the import: {0}")]
    Store(#[from] StoreError),

    #[error("You must be signed in to import FAQ entries")]
    AuthRequired,
}

impl ImportError {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Parse(_) => OutcomeKind::ParseFailed,
            Self::Header(_) => OutcomeKind::HeaderInvalid,
            Self::EmptyImport => OutcomeKind::NothingToImport,
            Self::InvalidRows(_) => OutcomeKind::InvalidRows,
            Self::Store(_) => OutcomeKind::StoreFailed,
            Self::AuthRequired => OutcomeKind::AuthRequired,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Imported,
    NothingToImport,
    ParseFailed,
    HeaderInvalid,
    InvalidRows,
    StoreFailed,
    AuthRequired,
}

/// Aggregate result of one import, as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub kind: OutcomeKind,
    pub inserted_count: usize,
    /// `false` for success and for the informational nothing-to-import case.
    pub failed: bool,
    pub reason: Option<String>,
}

impl ImportOutcome {
    pub fn imported(inserted_count: usize) -> Self {
        Self {
            kind: OutcomeKind::Imported,
            inserted_count,
            failed: false,
            reason: None,
        }
    }

    pub fn from_error(err: &ImportError) -> Self {
        let kind = err.kind();
        Self {
            kind,
            inserted_count: 0,
            failed: kind != OutcomeKind::NothingToImport,
            reason: Some(err.to_string()),
        }
    }

    /// The user-facing notice for this outcome.
    pub fn notice(&self) -> Notice {
        let reason = self.reason.clone().unwrap_or_default();
        match self.kind {
            OutcomeKind::Imported => {
                let message = format!("Imported {} FAQ entries.", self.inserted_count);
                match &self.reason {
                    Some(warning) => Notice::success("Import complete", format!("{message} {warning}")),
                    None => Notice::success("Import complete", message),
                }
            }
            OutcomeKind::NothingToImport => Notice::info("Nothing to import", reason),
            OutcomeKind::HeaderInvalid => Notice::error(
                "Import failed",
                format!("{reason}. Download the template for the expected columns."),
            ),
            OutcomeKind::ParseFailed | OutcomeKind::InvalidRows | OutcomeKind::StoreFailed => {
                Notice::error("Import failed", reason)
            }
            OutcomeKind::AuthRequired => Notice::error("Sign in required", reason),
        }
    }
}

/// Result of a successful batch commit.
#[derive(Debug, Clone)]
pub struct CommitReport {
    pub inserted_count: usize,
    /// The owner's collection as re-read after the insert. `Err` carries the
    /// reason when the insert landed but the re-read failed.
    pub refreshed: Result<Vec<FaqRecord>, String>,
}

/// What [`run_import`] hands back to its caller.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub outcome: ImportOutcome,
    pub notice: Notice,
    /// The owner's refreshed collection, present only after a successful commit.
    pub entries: Option<Vec<FaqRecord>>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Append `candidates` to `owner`'s collection in one all-or-nothing batch.
///
/// Refuses without an owner and never touches the store for an empty batch.
/// Store failures are returned verbatim; there is no retry.
pub async fn commit<S: FaqStore>(
    store: &S,
    candidates: Vec<CandidateRecord>,
    owner: Option<OwnerId>,
) -> Result<CommitReport, ImportError> {
    let owner = owner.ok_or(ImportError::AuthRequired)?;
    if candidates.is_empty() {
        return Err(ImportError::EmptyImport);
    }

    // Same validation as manual entry; one bad entry rejects the whole batch.
    let entries = candidates
        .into_iter()
        .map(|candidate| candidate.into_new_faq().validated())
        .collect::<Result<Vec<NewFaq>, _>>()
        .map_err(ImportError::InvalidRows)?;

    let inserted = store.insert_batch(owner, entries).await?;

    let refreshed = store.list(owner).await.map_err(|e| e.to_string());

    Ok(CommitReport {
        inserted_count: inserted.len(),
        refreshed,
    })
}

/// Import an uploaded spreadsheet for the current session's owner.
///
/// The owner is read once from `session`. Every outcome, success or not, is
/// pushed to `sink` and returned.
pub async fn run_import<S, P, N>(
    store: &S,
    session: &P,
    sink: &N,
    file_name: &str,
    bytes: &[u8],
) -> ImportReport
where
    S: FaqStore,
    P: SessionProvider + Sync + ?Sized,
    N: NotificationSink + Sync + ?Sized,
{
    let owner = session.current_owner();

    let (outcome, entries) = match reconcile(store, owner, file_name, bytes).await {
        Ok(report) => match report.refreshed {
            Ok(entries) => (ImportOutcome::imported(report.inserted_count), Some(entries)),
            Err(reason) => {
                let mut outcome = ImportOutcome::imported(report.inserted_count);
                outcome.reason = Some(format!("Reloading the list failed: {reason}"));
                (outcome, None)
            }
        },
        Err(err) => (ImportOutcome::from_error(&err), None),
    };

    let notice = outcome.notice();
    sink.notify(&notice);

    ImportReport {
        outcome,
        notice,
        entries,
    }
}

async fn reconcile<S: FaqStore>(
    store: &S,
    owner: Option<OwnerId>,
    file_name: &str,
    bytes: &[u8],
) -> Result<CommitReport, ImportError> {
    let owner = owner.ok_or(ImportError::AuthRequired)?;

    let rows = parse_sheet(file_name, bytes)?;
    let (header, body) = rows.split_first().ok_or(ParseError::NoHeader)?;
    let columns = resolve_header(header)?;
    let candidates: Vec<CandidateRecord> = extract_candidates(body, &columns).collect();

    commit(store, candidates, Some(owner)).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
