/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Owner identities are UUID subjects issued by the external identity provider.
pub type OwnerId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
