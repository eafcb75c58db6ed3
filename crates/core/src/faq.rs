//! FAQ knowledge-base records and field validation.
//!
//! Manual entry and bulk import both funnel through [`NewFaq::validated`], so
//! every persisted record carries a non-blank question and answer no matter
//! how it was created.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, OwnerId, Timestamp};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Entity name used in not-found errors.
pub const FAQ_ENTITY: &str = "FAQ entry";

pub const STATUS_ACTIVE: &str = "Active";
pub const STATUS_DRAFT: &str = "Draft";

/// Publication status of a FAQ entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FaqStatus {
    #[default]
    Active,
    Draft,
}

impl FaqStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => STATUS_ACTIVE,
            Self::Draft => STATUS_DRAFT,
        }
    }
}

impl fmt::Display for FaqStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FaqStatus {
    type Err = CoreError;

    /// Parse a status name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "draft" => Ok(Self::Draft),
            other => Err(CoreError::Validation(format!(
                "Unknown FAQ status '{other}'. Must be one of: {STATUS_ACTIVE}, {STATUS_DRAFT}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A persisted FAQ entry as returned by a record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqRecord {
    pub id: DbId,
    pub owner: OwnerId,
    pub category: String,
    pub question: String,
    pub answer: String,
    pub status: FaqStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields for a new FAQ entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewFaq {
    #[serde(default)]
    pub category: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub status: FaqStatus,
}

impl NewFaq {
    /// Trim every text field and reject a blank question or answer.
    pub fn validated(self) -> Result<Self, CoreError> {
        require_text("question", &self.question)?;
        require_text("answer", &self.answer)?;
        Ok(Self {
            category: self.category.trim().to_string(),
            question: self.question.trim().to_string(),
            answer: self.answer.trim().to_string(),
            status: self.status,
        })
    }
}

/// Partial update for an existing FAQ entry. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FaqChanges {
    pub category: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub status: Option<FaqStatus>,
}

impl FaqChanges {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.question.is_none()
            && self.answer.is_none()
            && self.status.is_none()
    }

    /// Trim provided fields; a provided question or answer must not be blank.
    pub fn validated(self) -> Result<Self, CoreError> {
        if self.is_empty() {
            return Err(CoreError::Validation(
                "At least one field must be provided".to_string(),
            ));
        }
        if let Some(question) = &self.question {
            require_text("question", question)?;
        }
        if let Some(answer) = &self.answer {
            require_text("answer", answer)?;
        }
        Ok(Self {
            category: self.category.map(|v| v.trim().to_string()),
            question: self.question.map(|v| v.trim().to_string()),
            answer: self.answer.map(|v| v.trim().to_string()),
            status: self.status,
        })
    }

    /// Overwrite the provided fields on `record`. Owner and id never change.
    pub fn apply_to(&self, record: &mut FaqRecord) {
        if let Some(category) = &self.category {
            record.category.clone_from(category);
        }
        if let Some(question) = &self.question {
            record.question.clone_from(question);
        }
        if let Some(answer) = &self.answer {
            record.answer.clone_from(answer);
        }
        if let Some(status) = self.status {
            record.status = status;
        }
    }
}

/// Returns `true` if the value is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), CoreError> {
    if is_blank(value) {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
