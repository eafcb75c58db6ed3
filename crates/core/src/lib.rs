//! ReplyDesk domain core.
//!
//! Pure logic shared by the database and HTTP layers: FAQ record types and
//! validation, connected chat channels, the store/session/notification
//! contracts, spreadsheet import reconciliation, plan status and the
//! downloadable import template.

pub mod channel;
pub mod error;
pub mod faq;
pub mod import;
pub mod notice;
pub mod plan;
pub mod session;
pub mod store;
pub mod types;
