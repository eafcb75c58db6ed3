//! Persistence for ReplyDesk.
//!
//! - [`models`] -- row structs and their conversion into core records.
//! - [`repositories`] -- zero-sized repositories issuing SQL against a pool.
//! - [`store`] -- [`FaqStore`](replydesk_core::store::FaqStore) and
//!   [`ChannelStore`](replydesk_core::store::ChannelStore) implementations
//!   (PostgreSQL and in-memory) and the runtime-selected [`store::Backend`].

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
