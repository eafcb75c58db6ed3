//! Access to the identity of the current caller.
//!
//! The reconciler asks for the owner once per operation instead of reading
//! ambient state; whoever drives it injects the provider.

use crate::types::OwnerId;

pub trait SessionProvider {
    /// The authenticated owner, or `None` when nobody is signed in.
    fn current_owner(&self) -> Option<OwnerId>;
}

impl SessionProvider for OwnerId {
    fn current_owner(&self) -> Option<OwnerId> {
        Some(*self)
    }
}

impl SessionProvider for Option<OwnerId> {
    fn current_owner(&self) -> Option<OwnerId> {
        *self
    }
}
