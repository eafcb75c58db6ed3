//! Row struct for the `channels` table.

use replydesk_core::channel::{ApiToken, ChannelKind, ChannelRecord};
use replydesk_core::store::StoreError;
use replydesk_core::types::{DbId, OwnerId, Timestamp};
use sqlx::FromRow;

/// A row from the `channels` table.
#[derive(Clone, FromRow)]
pub struct ChannelRow {
    pub id: DbId,
    pub owner_id: OwnerId,
    pub kind: String,
    pub name: String,
    pub api_token: String,
    pub created_at: Timestamp,
}

impl TryFrom<ChannelRow> for ChannelRecord {
    type Error = StoreError;

    fn try_from(row: ChannelRow) -> Result<Self, Self::Error> {
        let kind: ChannelKind = row.kind.parse().map_err(|_| {
            StoreError::Backend(format!(
                "Unknown channel type '{}' on channel {}",
                row.kind, row.id
            ))
        })?;

        Ok(ChannelRecord {
            id: row.id,
            owner: row.owner_id,
            kind,
            name: row.name,
            api_token: ApiToken::new(row.api_token),
            created_at: row.created_at,
        })
    }
}
