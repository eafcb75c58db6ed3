//! Record store contracts for FAQ entries and connected channels.
//!
//! Every operation is scoped by owner. Lookups filter on id and owner in one
//! predicate, so a record belonging to someone else reports
//! [`StoreError::NotFound`] exactly like a missing one.

use std::future::Future;

use crate::channel::{ChannelRecord, NewChannel};
use crate::error::CoreError;
use crate::faq::{FaqChanges, FaqRecord, NewFaq};
use crate::types::{DbId, OwnerId};

/// Errors raised by a [`FaqStore`] or [`ChannelStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Backend(String),
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
            other => Self::Backend(other.to_string()),
        }
    }
}

/// Owner-scoped CRUD over FAQ entries.
///
/// Callers hand over already validated fields; implementations still keep
/// the batch insert all-or-nothing.
pub trait FaqStore: Send + Sync {
    /// All entries of `owner`, oldest first.
    fn list(
        &self,
        owner: OwnerId,
    ) -> impl Future<Output = Result<Vec<FaqRecord>, StoreError>> + Send;

    fn create(
        &self,
        owner: OwnerId,
        fields: NewFaq,
    ) -> impl Future<Output = Result<FaqRecord, StoreError>> + Send;

    fn update(
        &self,
        id: DbId,
        owner: OwnerId,
        changes: FaqChanges,
    ) -> impl Future<Output = Result<FaqRecord, StoreError>> + Send;

    fn delete(
        &self,
        id: DbId,
        owner: OwnerId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Insert every entry or none of them.
    fn insert_batch(
        &self,
        owner: OwnerId,
        entries: Vec<NewFaq>,
    ) -> impl Future<Output = Result<Vec<FaqRecord>, StoreError>> + Send;
}

/// Owner-scoped registry of connected chat channels.
///
/// Method names differ from [`FaqStore`] so one type can implement both.
pub trait ChannelStore: Send + Sync {
    /// All channels of `owner`, oldest first.
    fn list_channels(
        &self,
        owner: OwnerId,
    ) -> impl Future<Output = Result<Vec<ChannelRecord>, StoreError>> + Send;

    fn create_channel(
        &self,
        owner: OwnerId,
        fields: NewChannel,
    ) -> impl Future<Output = Result<ChannelRecord, StoreError>> + Send;

    fn delete_channel(
        &self,
        id: DbId,
        owner: OwnerId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
