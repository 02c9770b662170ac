//! Session state and the authentication bootstrap state machine.
//!
//! The hosted identity widget performs its own asynchronous check after
//! setup and reports the outcome through a callback. This module owns that
//! one-time initialization: [`Bootstrap`] registers against the widget,
//! interprets the outcome through the pure decision function
//! [`resolve_outcome`](bootstrap::resolve_outcome), mutates the [`Session`],
//! and issues exactly one navigation.
//!
//! The session is an explicit context object with a defined lifecycle:
//! created at application start via [`SessionHandle::new`], then passed to
//! the view layer and anything else that needs to gate on it. It is never
//! ambient global state.

pub mod bootstrap;
pub mod mock;
pub mod path;

pub use bootstrap::{
    resolve_outcome, AuthEvent, AuthWidget, Bootstrap, BootstrapState, Decision, Navigator,
    SessionPatch,
};
pub use path::PathIntent;

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

/// Per-page-load session state.
///
/// Created once per application load and mutated only by the bootstrap
/// machine in response to the widget's callback. The view layer renders
/// nothing but a busy indicator while `initialized` is `false`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Whether the bootstrap reached its terminal state (success or error).
    pub initialized: bool,
    /// Whether the widget reported an authenticated user.
    pub authenticated: bool,
    /// The opaque user record from the widget, when authenticated.
    pub user: Option<Value>,
}

/// Shared handle to the session, cheap to clone.
///
/// # Examples
///
/// ```
/// use flowmastery::session::SessionHandle;
///
/// let session = SessionHandle::new();
/// assert!(!session.is_initialized());
/// assert!(!session.is_authenticated());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionHandle(Arc<RwLock<Session>>);

impl SessionHandle {
    /// Creates a fresh, uninitialized session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A point-in-time copy of the session state.
    pub fn snapshot(&self) -> Session {
        self.0.read().clone()
    }

    /// Whether the bootstrap reached its terminal state.
    pub fn is_initialized(&self) -> bool {
        self.0.read().initialized
    }

    /// Whether the widget reported an authenticated user.
    pub fn is_authenticated(&self) -> bool {
        self.0.read().authenticated
    }

    /// Applies an outcome patch: authenticated flag and stored user.
    pub fn apply(&self, patch: SessionPatch) {
        let mut session = self.0.write();
        session.authenticated = patch.authenticated;
        session.user = patch.user;
    }

    /// Marks the bootstrap terminal. Set unconditionally at the end of both
    /// the outcome and error paths so the UI never stalls in the busy state.
    pub fn mark_initialized(&self) {
        self.0.write().initialized = true;
    }

    /// Clears authentication after logout. `initialized` stays `true`; the
    /// page load remains bootstrapped.
    pub fn clear(&self) {
        let mut session = self.0.write();
        session.authenticated = false;
        session.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn apply_and_clear() {
        let handle = SessionHandle::new();
        handle.apply(SessionPatch {
            authenticated: true,
            user: Some(json!({"id": "u1"})),
        });
        handle.mark_initialized();

        assert!(handle.is_authenticated());
        assert!(handle.is_initialized());

        handle.clear();
        let session = handle.snapshot();
        assert!(!session.authenticated);
        assert!(session.user.is_none());
        assert!(session.initialized, "clear must not reset initialization");
    }
}
