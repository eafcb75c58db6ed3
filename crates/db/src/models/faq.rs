//! Row struct for the `faq_entries` table.

use replydesk_core::faq::{FaqRecord, FaqStatus};
use replydesk_core::store::StoreError;
use replydesk_core::types::{DbId, OwnerId, Timestamp};
use sqlx::FromRow;

/// A row from the `faq_entries` table.
#[derive(Debug, Clone, FromRow)]
pub struct FaqRow {
    pub id: DbId,
    pub owner_id: OwnerId,
    pub category: String,
    pub question: String,
    pub answer: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<FaqRow> for FaqRecord {
    type Error = StoreError;

    fn try_from(row: FaqRow) -> Result<Self, Self::Error> {
        let status: FaqStatus = row.status.parse().map_err(|_| {
            StoreError::Backend(format!(
                "Unknown status '{}' on FAQ entry {}",
                row.status, row.id
            ))
        })?;

        Ok(FaqRecord {
            id: row.id,
            owner: row.owner_id,
            category: row.category,
            question: row.question,
            answer: row.answer,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
