//! Authentication primitives.
//!
//! - [`jwt`] -- validation of access tokens issued by the identity provider.

pub mod jwt;
