//! PostgreSQL-backed FAQ and channel store.

use replydesk_core::channel::{ChannelRecord, NewChannel, CHANNEL_ENTITY};
use replydesk_core::faq::{FaqChanges, FaqRecord, NewFaq, FAQ_ENTITY};
use replydesk_core::store::{ChannelStore, FaqStore, StoreError};
use replydesk_core::types::{DbId, OwnerId};

use crate::models::faq::FaqRow;
use crate::repositories::{ChannelRepo, FaqRepo};
use crate::DbPool;

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Map a driver error onto the store contract. Check-constraint violations
/// (blank fields, unknown status or channel type) surface as validation
/// errors.
fn map_sqlx(err: sqlx::Error) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_check_violation() {
            return StoreError::Validation(db_err.message().to_string());
        }
    }
    StoreError::Backend(err.to_string())
}

fn into_records(rows: Vec<FaqRow>) -> Result<Vec<FaqRecord>, StoreError> {
    rows.into_iter().map(FaqRecord::try_from).collect()
}

impl FaqStore for PgStore {
    async fn list(&self, owner: OwnerId) -> Result<Vec<FaqRecord>, StoreError> {
        let rows = FaqRepo::list_for_owner(&self.pool, owner)
            .await
            .map_err(map_sqlx)?;
        into_records(rows)
    }

    async fn create(&self, owner: OwnerId, fields: NewFaq) -> Result<FaqRecord, StoreError> {
        let row = FaqRepo::create(&self.pool, owner, &fields)
            .await
            .map_err(map_sqlx)?;
        tracing::debug!(faq_id = row.id, %owner, "FAQ entry inserted");
        FaqRecord::try_from(row)
    }

    async fn update(
        &self,
        id: DbId,
        owner: OwnerId,
        changes: FaqChanges,
    ) -> Result<FaqRecord, StoreError> {
        let row = FaqRepo::update(&self.pool, id, owner, &changes)
            .await
            .map_err(map_sqlx)?
            .ok_or(StoreError::NotFound {
                entity: FAQ_ENTITY,
                id,
            })?;
        FaqRecord::try_from(row)
    }

    async fn delete(&self, id: DbId, owner: OwnerId) -> Result<(), StoreError> {
        let deleted = FaqRepo::delete(&self.pool, id, owner)
            .await
            .map_err(map_sqlx)?;
        if deleted {
            Ok(())
        } else {
            Err(StoreError::NotFound {
                entity: FAQ_ENTITY,
                id,
            })
        }
    }

    async fn insert_batch(
        &self,
        owner: OwnerId,
        entries: Vec<NewFaq>,
    ) -> Result<Vec<FaqRecord>, StoreError> {
        let rows = FaqRepo::insert_batch(&self.pool, owner, &entries)
            .await
            .map_err(map_sqlx)?;
        tracing::debug!(count = rows.len(), %owner, "FAQ batch inserted");
        into_records(rows)
    }
}

impl ChannelStore for PgStore {
    async fn list_channels(&self, owner: OwnerId) -> Result<Vec<ChannelRecord>, StoreError> {
        let rows = ChannelRepo::list_for_owner(&self.pool, owner)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter().map(ChannelRecord::try_from).collect()
    }

    async fn create_channel(
        &self,
        owner: OwnerId,
        fields: NewChannel,
    ) -> Result<ChannelRecord, StoreError> {
        let row = ChannelRepo::create(&self.pool, owner, &fields)
            .await
            .map_err(map_sqlx)?;
        tracing::info!(channel_id = row.id, kind = %fields.kind, %owner, "Channel connected");
        ChannelRecord::try_from(row)
    }

    async fn delete_channel(&self, id: DbId, owner: OwnerId) -> Result<(), StoreError> {
        let deleted = ChannelRepo::delete(&self.pool, id, owner)
            .await
            .map_err(map_sqlx)?;
        if deleted {
            tracing::info!(channel_id = id, %owner, "Channel removed");
            Ok(())
        } else {
            Err(StoreError::NotFound {
                entity: CHANNEL_ENTITY,
                id,
            })
        }
    }
}
