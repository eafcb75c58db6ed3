//! Repository for the `channels` table.

use replydesk_core::channel::NewChannel;
use replydesk_core::types::{DbId, OwnerId};
use sqlx::PgPool;

use crate::models::channel::ChannelRow;

/// Column list for `channels` queries.
const COLUMNS: &str = "id, owner_id, kind, name, api_token, created_at";

/// Provides data access for connected channels.
pub struct ChannelRepo;

impl ChannelRepo {
    /// List all channels of an owner, oldest first.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner: OwnerId,
    ) -> Result<Vec<ChannelRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM channels \
             WHERE owner_id = $1 \
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ChannelRow>(&query)
            .bind(owner)
            .fetch_all(pool)
            .await
    }

    /// Insert a new channel.
    pub async fn create(
        pool: &PgPool,
        owner: OwnerId,
        input: &NewChannel,
    ) -> Result<ChannelRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO channels (owner_id, kind, name, api_token) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChannelRow>(&query)
            .bind(owner)
            .bind(input.kind.as_str())
            .bind(&input.name)
            .bind(input.token.expose())
            .fetch_one(pool)
            .await
    }

    /// Delete a channel. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId, owner: OwnerId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM channels WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
