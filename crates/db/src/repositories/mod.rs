//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod channel_repo;
pub mod faq_repo;

pub use channel_repo::ChannelRepo;
pub use faq_repo::FaqRepo;
