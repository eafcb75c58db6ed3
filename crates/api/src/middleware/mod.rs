//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the owner identity from a JWT Bearer token.

pub mod auth;
