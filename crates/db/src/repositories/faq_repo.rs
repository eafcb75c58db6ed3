//! Repository for the `faq_entries` table.
//!
//! Every statement filters on `owner_id` next to `id`, so rows owned by
//! someone else behave exactly like missing rows.

use replydesk_core::faq::{FaqChanges, NewFaq};
use replydesk_core::types::{DbId, OwnerId};
use sqlx::PgPool;

use crate::models::faq::FaqRow;

/// Column list for `faq_entries` queries.
const COLUMNS: &str = "\
    id, owner_id, category, question, answer, status, \
    created_at, updated_at";

/// Provides data access for FAQ entries.
pub struct FaqRepo;

impl FaqRepo {
    /// List all entries of an owner, oldest first.
    pub async fn list_for_owner(pool: &PgPool, owner: OwnerId) -> Result<Vec<FaqRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM faq_entries \
             WHERE owner_id = $1 \
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, FaqRow>(&query)
            .bind(owner)
            .fetch_all(pool)
            .await
    }

    /// Find a single entry by id within an owner's collection.
    pub async fn find_for_owner(
        pool: &PgPool,
        id: DbId,
        owner: OwnerId,
    ) -> Result<Option<FaqRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faq_entries WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, FaqRow>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(pool)
            .await
    }

    /// Count the entries of an owner.
    pub async fn count_for_owner(pool: &PgPool, owner: OwnerId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM faq_entries WHERE owner_id = $1")
            .bind(owner)
            .fetch_one(pool)
            .await
    }

    /// Insert a new entry.
    pub async fn create(pool: &PgPool, owner: OwnerId, input: &NewFaq) -> Result<FaqRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO faq_entries (owner_id, category, question, answer, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FaqRow>(&query)
            .bind(owner)
            .bind(&input.category)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(input.status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Insert several entries in one transaction. Either all rows land or none.
    pub async fn insert_batch(
        pool: &PgPool,
        owner: OwnerId,
        inputs: &[NewFaq],
    ) -> Result<Vec<FaqRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO faq_entries (owner_id, category, question, answer, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );

        let mut rows = Vec::with_capacity(inputs.len());
        for input in inputs {
            let row = sqlx::query_as::<_, FaqRow>(&query)
                .bind(owner)
                .bind(&input.category)
                .bind(&input.question)
                .bind(&input.answer)
                .bind(input.status.as_str())
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok(rows)
    }

    /// Partially update an entry.
    ///
    /// Uses `COALESCE` so only provided fields are changed. Returns `None`
    /// when no row matches both `id` and `owner`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner: OwnerId,
        input: &FaqChanges,
    ) -> Result<Option<FaqRow>, sqlx::Error> {
        let query = format!(
            "UPDATE faq_entries SET \
                 category   = COALESCE($3, category), \
                 question   = COALESCE($4, question), \
                 answer     = COALESCE($5, answer), \
                 status     = COALESCE($6, status), \
                 updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FaqRow>(&query)
            .bind(id)
            .bind(owner)
            .bind(&input.category)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(input.status.map(|s| s.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId, owner: OwnerId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM faq_entries WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
