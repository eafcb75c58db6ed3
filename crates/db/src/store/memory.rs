//! In-process FAQ and channel store.
//!
//! Applies the same rules as the `faq_entries` and `channels` check
//! constraints, so code exercised against it behaves like it would against
//! PostgreSQL.

use std::sync::Arc;

use chrono::Utc;
use replydesk_core::channel::{ChannelRecord, NewChannel, CHANNEL_ENTITY};
use replydesk_core::faq::{FaqChanges, FaqRecord, NewFaq, FAQ_ENTITY};
use replydesk_core::store::{ChannelStore, FaqStore, StoreError};
use replydesk_core::types::{DbId, OwnerId};
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    next_id: DbId,
    records: Vec<FaqRecord>,
    next_channel_id: DbId,
    channels: Vec<ChannelRecord>,
}

impl Inner {
    fn insert(&mut self, owner: OwnerId, fields: NewFaq) -> FaqRecord {
        self.next_id += 1;
        let now = Utc::now();
        let record = FaqRecord {
            id: self.next_id,
            owner,
            category: fields.category,
            question: fields.question,
            answer: fields.answer,
            status: fields.status,
            created_at: now,
            updated_at: now,
        };
        self.records.push(record.clone());
        record
    }

    fn position(&self, id: DbId, owner: OwnerId) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.id == id && r.owner == owner)
    }

    fn insert_channel(&mut self, owner: OwnerId, fields: NewChannel) -> ChannelRecord {
        self.next_channel_id += 1;
        let channel = ChannelRecord {
            id: self.next_channel_id,
            owner,
            kind: fields.kind,
            name: fields.name,
            api_token: fields.token,
            created_at: Utc::now(),
        };
        self.channels.push(channel.clone());
        channel
    }
}

/// Cheaply cloneable handle; clones share the same entries.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FaqStore for MemoryStore {
    async fn list(&self, owner: OwnerId) -> Result<Vec<FaqRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .iter()
            .filter(|r| r.owner == owner)
            .cloned()
            .collect())
    }

    async fn create(&self, owner: OwnerId, fields: NewFaq) -> Result<FaqRecord, StoreError> {
        let fields = fields.validated()?;
        let mut inner = self.inner.write().await;
        Ok(inner.insert(owner, fields))
    }

    async fn update(
        &self,
        id: DbId,
        owner: OwnerId,
        changes: FaqChanges,
    ) -> Result<FaqRecord, StoreError> {
        let changes = changes.validated()?;
        let mut inner = self.inner.write().await;
        let index = inner
            .position(id, owner)
            .ok_or(StoreError::NotFound {
                entity: FAQ_ENTITY,
                id,
            })?;

        let record = &mut inner.records[index];
        changes.apply_to(record);
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, id: DbId, owner: OwnerId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .position(id, owner)
            .ok_or(StoreError::NotFound {
                entity: FAQ_ENTITY,
                id,
            })?;
        inner.records.remove(index);
        Ok(())
    }

    async fn insert_batch(
        &self,
        owner: OwnerId,
        entries: Vec<NewFaq>,
    ) -> Result<Vec<FaqRecord>, StoreError> {
        // Validate everything before touching the collection.
        let entries = entries
            .into_iter()
            .map(NewFaq::validated)
            .collect::<Result<Vec<_>, _>>()?;

        let mut inner = self.inner.write().await;
        Ok(entries
            .into_iter()
            .map(|fields| inner.insert(owner, fields))
            .collect())
    }
}

impl ChannelStore for MemoryStore {
    async fn list_channels(&self, owner: OwnerId) -> Result<Vec<ChannelRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .channels
            .iter()
            .filter(|c| c.owner == owner)
            .cloned()
            .collect())
    }

    async fn create_channel(
        &self,
        owner: OwnerId,
        fields: NewChannel,
    ) -> Result<ChannelRecord, StoreError> {
        let fields = fields.validated()?;
        let mut inner = self.inner.write().await;
        Ok(inner.insert_channel(owner, fields))
    }

    async fn delete_channel(&self, id: DbId, owner: OwnerId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .channels
            .iter()
            .position(|c| c.id == id && c.owner == owner)
            .ok_or(StoreError::NotFound {
                entity: CHANNEL_ENTITY,
                id,
            })?;
        inner.channels.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use replydesk_core::channel::{ApiToken, ChannelKind};
    use replydesk_core::faq::FaqStatus;
    use uuid::Uuid;

    fn faq(question: &str, answer: &str) -> NewFaq {
        NewFaq {
            category: "General".to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            status: FaqStatus::Active,
        }
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.create(alice, faq("A?", "a")).await.unwrap();
        store.create(bob, faq("B?", "b")).await.unwrap();

        let entries = store.list(alice).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].question, "A?");
    }

    #[tokio::test]
    async fn foreign_record_is_not_found_and_untouched() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let record = store.create(alice, faq("A?", "a")).await.unwrap();

        assert_matches!(
            store.delete(record.id, bob).await,
            Err(StoreError::NotFound { id, .. }) if id == record.id
        );
        let changes = FaqChanges {
            answer: Some("hijacked".to_string()),
            ..Default::default()
        };
        assert_matches!(
            store.update(record.id, bob, changes).await,
            Err(StoreError::NotFound { .. })
        );

        let entries = store.list(alice).await.unwrap();
        assert_eq!(entries, vec![record]);
    }

    #[tokio::test]
    async fn update_changes_only_provided_fields() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let record = store.create(owner, faq("Q?", "A")).await.unwrap();

        let updated = store
            .update(
                record.id,
                owner,
                FaqChanges {
                    status: Some(FaqStatus::Draft),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, FaqStatus::Draft);
        assert_eq!(updated.question, "Q?");
        assert!(updated.updated_at >= record.updated_at);
    }

    #[tokio::test]
    async fn batch_with_invalid_entry_inserts_nothing() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        let result = store
            .insert_batch(owner, vec![faq("Q1", "A1"), faq("Q2", "  ")])
            .await;

        assert_matches!(result, Err(StoreError::Validation(_)));
        assert!(store.list(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn batch_assigns_increasing_ids_in_order() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        let inserted = store
            .insert_batch(owner, vec![faq("Q1", "A1"), faq("Q2", "A2")])
            .await
            .unwrap();

        assert!(inserted[0].id < inserted[1].id);
        let listed: Vec<_> = store
            .list(owner)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.question)
            .collect();
        assert_eq!(listed, vec!["Q1", "Q2"]);
    }

    fn channel(kind: ChannelKind, name: &str) -> NewChannel {
        NewChannel {
            kind,
            name: name.to_string(),
            token: ApiToken::new("page-access-token-0001"),
        }
    }

    #[tokio::test]
    async fn channels_are_scoped_to_owner_and_separate_from_faqs() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.create(alice, faq("A?", "a")).await.unwrap();
        let fb = store
            .create_channel(alice, channel(ChannelKind::Facebook, "Acme FB Page"))
            .await
            .unwrap();
        store
            .create_channel(bob, channel(ChannelKind::Instagram, "Bob IG"))
            .await
            .unwrap();

        assert_eq!(fb.id, 1);
        assert_eq!(store.list_channels(alice).await.unwrap(), vec![fb]);
        assert_eq!(store.list(alice).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_channel_name_is_rejected() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        let result = store
            .create_channel(owner, channel(ChannelKind::Facebook, "   "))
            .await;

        assert_matches!(result, Err(StoreError::Validation(_)));
        assert!(store.list_channels(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn foreign_channel_delete_is_not_found() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let ig = store
            .create_channel(alice, channel(ChannelKind::Instagram, "Acme IG"))
            .await
            .unwrap();

        assert_matches!(
            store.delete_channel(ig.id, bob).await,
            Err(StoreError::NotFound { entity, id }) if entity == CHANNEL_ENTITY && id == ig.id
        );
        store.delete_channel(ig.id, alice).await.unwrap();
        assert!(store.list_channels(alice).await.unwrap().is_empty());
    }
}
