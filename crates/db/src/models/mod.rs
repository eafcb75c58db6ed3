//! Database row structs.
//!
//! Each submodule contains a `FromRow` struct matching the table columns and
//! its conversion into the corresponding `replydesk_core` record.

pub mod channel;
pub mod faq;
