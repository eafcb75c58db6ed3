//! [`FaqStore`] and [`ChannelStore`] implementations.
//!
//! [`PgStore`] is the production backend. [`MemoryStore`] keeps
//! records in process and backs local development and the API tests.
//! [`Backend`] picks one of them at startup.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use replydesk_core::channel::{ChannelRecord, NewChannel};
use replydesk_core::faq::{FaqChanges, FaqRecord, NewFaq};
use replydesk_core::store::{ChannelStore, FaqStore, StoreError};
use replydesk_core::types::{DbId, OwnerId};

/// Store selected at runtime via `STORE_BACKEND`.
#[derive(Clone)]
pub enum Backend {
    Postgres(PgStore),
    Memory(MemoryStore),
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Verify the backend is reachable. The memory store always is.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        match self {
            Self::Postgres(store) => crate::health_check(store.pool())
                .await
                .map_err(|e| StoreError::Backend(e.to_string())),
            Self::Memory(_) => Ok(()),
        }
    }
}

impl FaqStore for Backend {
    async fn list(&self, owner: OwnerId) -> Result<Vec<FaqRecord>, StoreError> {
        match self {
            Self::Postgres(store) => store.list(owner).await,
            Self::Memory(store) => store.list(owner).await,
        }
    }

    async fn create(&self, owner: OwnerId, fields: NewFaq) -> Result<FaqRecord, StoreError> {
        match self {
            Self::Postgres(store) => store.create(owner, fields).await,
            Self::Memory(store) => store.create(owner, fields).await,
        }
    }

    async fn update(
        &self,
        id: DbId,
        owner: OwnerId,
        changes: FaqChanges,
    ) -> Result<FaqRecord, StoreError> {
        match self {
            Self::Postgres(store) => store.update(id, owner, changes).await,
            Self::Memory(store) => store.update(id, owner, changes).await,
        }
    }

    async fn delete(&self, id: DbId, owner: OwnerId) -> Result<(), StoreError> {
        match self {
            Self::Postgres(store) => store.delete(id, owner).await,
            Self::Memory(store) => store.delete(id, owner).await,
        }
    }

    async fn insert_batch(
        &self,
        owner: OwnerId,
        entries: Vec<NewFaq>,
    ) -> Result<Vec<FaqRecord>, StoreError> {
        match self {
            Self::Postgres(store) => store.insert_batch(owner, entries).await,
            Self::Memory(store) => store.insert_batch(owner, entries).await,
        }
    }
}

impl ChannelStore for Backend {
    async fn list_channels(&self, owner: OwnerId) -> Result<Vec<ChannelRecord>, StoreError> {
        match self {
            Self::Postgres(store) => store.list_channels(owner).await,
            Self::Memory(store) => store.list_channels(owner).await,
        }
    }

    async fn create_channel(
        &self,
        owner: OwnerId,
        fields: NewChannel,
    ) -> Result<ChannelRecord, StoreError> {
        match self {
            Self::Postgres(store) => store.create_channel(owner, fields).await,
            Self::Memory(store) => store.create_channel(owner, fields).await,
        }
    }

    async fn delete_channel(&self, id: DbId, owner: OwnerId) -> Result<(), StoreError> {
        match self {
            Self::Postgres(store) => store.delete_channel(id, owner).await,
            Self::Memory(store) => store.delete_channel(id, owner).await,
        }
    }
}
