//! The authentication bootstrap state machine and its decision procedure.
//!
//! The hosted widget is modeled as an event source ([`AuthWidget`]) that
//! yields one [`AuthEvent`] per page load. The routing decision itself is
//! [`resolve_outcome`], a pure function of the outcome and the location, so
//! the whole table is testable without the real widget. [`Bootstrap`] wires the pieces together: it subscribes once,
//! applies the resulting [`SessionPatch`], issues exactly one navigation,
//! and always terminates with the session initialized, on the error path
//! included.
//!
//! # State Machine
//!
//! ```text
//! Uninitialized -> Initializing -> Ready { authenticated }
//! ```
//!
//! Once `Ready`, the machine never re-enters `Initializing` for the
//! lifetime of the page load; a later login/logout cycle re-derives
//! `Ready { authenticated }` through the same callback path. Repeated
//! callback delivery is safe: re-running the decision produces a
//! consistent session, never a corrupted one.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::app::notify::Notifier;
use crate::error::Result;
use crate::session::path::PathIntent;
use crate::session::SessionHandle;

/// The widget's one-shot report for this page load.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    /// The widget finished its check. `Some(user)` when a session exists,
    /// `None` when the visitor is unauthenticated.
    Outcome(Option<Value>),
    /// The widget itself failed. The widget owns any retry; the bootstrap
    /// only records the failure and unblocks rendering.
    Error(String),
}

/// The hosted identity widget, reduced to the two capabilities the
/// bootstrap needs: one outcome per page load, and logout.
#[async_trait]
pub trait AuthWidget: Send + Sync {
    /// Resolves when the widget reports its outcome for this page load.
    async fn watch(&self) -> AuthEvent;

    /// Ends the hosted session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`](crate::error::Error::Auth) when the widget
    /// call fails; the caller must leave session state untouched in that
    /// case.
    async fn logout(&self) -> Result<()>;
}

/// Navigation seam: the current location and the single navigation call the
/// bootstrap issues per outcome.
pub trait Navigator: Send + Sync {
    /// The current location, path plus query string.
    fn location(&self) -> String;

    /// Navigates to `target`.
    fn navigate(&self, target: &str);
}

/// Session mutation computed by [`resolve_outcome`]. Initialization is not
/// part of the patch; it is set unconditionally after the patch applies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionPatch {
    /// New authenticated flag.
    pub authenticated: bool,
    /// User record to store, when authenticated.
    pub user: Option<Value>,
}

/// The outcome of the decision procedure: a session patch and exactly one
/// navigation target.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// Session mutation to apply.
    pub patch: SessionPatch,
    /// Where to navigate. Always present; staying put is expressed as
    /// navigating to the current location.
    pub navigate: String,
}

/// Bootstrap lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    /// `run` has not been called.
    Uninitialized,
    /// Subscribed, waiting for the widget's callback.
    Initializing,
    /// Terminal for this page load.
    Ready {
        /// Whether the outcome carried a user.
        authenticated: bool,
    },
}

/// Fragments that suppress a login redirect when already on an auth page.
const REDIRECT_BLOCKED: [&str; 4] = ["error", "signup", "login", "callback"];

/// The core decision procedure: maps the widget outcome and the current
/// location to a session patch and a single navigation target.
///
/// Authenticated branch:
/// - an explicit `redirect` query parameter wins;
/// - otherwise, off the auth pages, the current location is re-affirmed
///   (with `/login`/`/signup` sent to `/` instead);
/// - otherwise (on an auth page with no redirect) the target is `/`.
///
/// Unauthenticated branch:
/// - off the auth pages, the target is a login redirect carrying the
///   current location;
/// - on an auth page with a `redirect` parameter, the redirect is folded
///   into a login redirect unless the location already names an auth
///   fragment, in which case the location is re-affirmed unchanged;
/// - on an auth page with no redirect, the location is re-affirmed.
///
/// # Examples
///
/// ```
/// use flowmastery::session::{resolve_outcome, PathIntent};
/// use serde_json::json;
///
/// let user = json!({"id": "u1"});
///
/// // Authenticated on /login with no redirect: go home.
/// let intent = PathIntent::from_location("/login");
/// assert_eq!(resolve_outcome(Some(&user), &intent).navigate, "/");
///
/// // Authenticated with an explicit redirect: honor it.
/// let intent = PathIntent::from_location("/dashboard?redirect=/settings");
/// assert_eq!(resolve_outcome(Some(&user), &intent).navigate, "/settings");
///
/// // Unauthenticated off the auth pages: login redirect.
/// let intent = PathIntent::from_location("/dashboard");
/// assert_eq!(
///     resolve_outcome(None, &intent).navigate,
///     "/login?redirect=/dashboard"
/// );
///
/// // Unauthenticated on /callback with a redirect: stay put.
/// let intent = PathIntent::from_location("/callback?redirect=/dashboard");
/// assert_eq!(
///     resolve_outcome(None, &intent).navigate,
///     "/callback?redirect=/dashboard"
/// );
/// ```
#[allow(clippy::if_same_then_else)]
pub fn resolve_outcome(user: Option<&Value>, intent: &PathIntent) -> Decision {
    let current_path = intent.current_path.as_str();

    if let Some(user) = user {
        let patch = SessionPatch {
            authenticated: true,
            user: Some(user.clone()),
        };
        let navigate = if let Some(redirect) = &intent.redirect_path {
            redirect.clone()
        } else if !intent.is_auth_page {
            // is_auth_page is false here, so these substrings cannot match;
            // the branch shape mirrors the widget's routing table.
            if current_path.contains("/login") || current_path.contains("/signup") {
                "/".to_string()
            } else {
                current_path.to_string()
            }
        } else {
            "/".to_string()
        };
        Decision { patch, navigate }
    } else {
        let patch = SessionPatch {
            authenticated: false,
            user: None,
        };
        let navigate = if !intent.is_auth_page {
            // As above: neither auth substring can match on this branch.
            if current_path.contains("/signup") {
                format!("/signup?redirect={current_path}")
            } else if current_path.contains("/login") {
                format!("/login?redirect={current_path}")
            } else {
                format!("/login?redirect={current_path}")
            }
        } else if let Some(redirect) = &intent.redirect_path {
            if REDIRECT_BLOCKED
                .iter()
                .any(|fragment| current_path.contains(fragment))
            {
                current_path.to_string()
            } else {
                format!("/login?redirect={redirect}")
            }
        } else {
            current_path.to_string()
        };
        Decision { patch, navigate }
    }
}

/// Owns the one-time widget initialization for a page load.
pub struct Bootstrap {
    widget: std::sync::Arc<dyn AuthWidget>,
    navigator: std::sync::Arc<dyn Navigator>,
    session: SessionHandle,
    state: Mutex<BootstrapState>,
}

impl Bootstrap {
    /// Wires the bootstrap against a widget, a navigator, and the session
    /// it owns for this page load.
    pub fn new(
        widget: std::sync::Arc<dyn AuthWidget>,
        navigator: std::sync::Arc<dyn Navigator>,
        session: SessionHandle,
    ) -> Self {
        Self {
            widget,
            navigator,
            session,
            state: Mutex::new(BootstrapState::Uninitialized),
        }
    }

    /// The current lifecycle state.
    pub fn state(&self) -> BootstrapState {
        *self.state.lock()
    }

    /// Subscribes to the widget and processes its outcome. Intended to be
    /// called exactly once per page load; later calls are ignored with a
    /// warning rather than re-entering `Initializing`.
    pub async fn run(&self) {
        {
            let mut state = self.state.lock();
            match *state {
                BootstrapState::Uninitialized => *state = BootstrapState::Initializing,
                BootstrapState::Initializing | BootstrapState::Ready { .. } => {
                    warn!(state = ?*state, "bootstrap already started; ignoring");
                    return;
                },
            }
        }

        let event = self.widget.watch().await;
        self.deliver(event);
    }

    /// Processes a widget callback. Safe to invoke again on repeated
    /// delivery: the decision is recomputed from current inputs and the
    /// session ends consistent, with `initialized = true` on every path.
    pub fn deliver(&self, event: AuthEvent) {
        match event {
            AuthEvent::Outcome(user) => {
                let intent = PathIntent::from_location(&self.navigator.location());
                let decision = resolve_outcome(user.as_ref(), &intent);
                let authenticated = decision.patch.authenticated;
                debug!(
                    authenticated,
                    target = %decision.navigate,
                    "bootstrap outcome resolved"
                );

                self.session.apply(decision.patch);
                self.navigator.navigate(&decision.navigate);
                self.session.mark_initialized();
                *self.state.lock() = BootstrapState::Ready { authenticated };
            },
            AuthEvent::Error(message) => {
                error!(%message, "auth widget failed during bootstrap");
                self.session.apply(SessionPatch::default());
                self.session.mark_initialized();
                *self.state.lock() = BootstrapState::Ready {
                    authenticated: false,
                };
            },
        }
    }

    /// Ends the hosted session.
    ///
    /// On success, clears the session, navigates to `/login`, and emits an
    /// informational notice. On failure, emits an error notice and leaves
    /// session state unchanged: no partial clear.
    ///
    /// # Errors
    ///
    /// Propagates the widget's [`Error::Auth`](crate::error::Error::Auth)
    /// after notifying.
    pub async fn logout(&self, notifier: &dyn Notifier) -> Result<()> {
        match self.widget.logout().await {
            Ok(()) => {
                self.session.clear();
                self.navigator.navigate("/login");
                notifier.info("You have been logged out");
                *self.state.lock() = BootstrapState::Ready {
                    authenticated: false,
                };
                Ok(())
            },
            Err(err) => {
                error!(error = %err, "logout failed");
                notifier.error(&format!("Failed to log out: {err}"));
                Err(err)
            },
        }
    }
}

impl std::fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrap")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn decide(user: Option<Value>, location: &str) -> Decision {
        let intent = PathIntent::from_location(location);
        resolve_outcome(user.as_ref(), &intent)
    }

    #[test]
    fn authenticated_redirect_wins() {
        let decision = decide(Some(json!({"id": 1})), "/dashboard?redirect=/settings");
        assert_eq!(decision.navigate, "/settings");
        assert!(decision.patch.authenticated);
    }

    #[test]
    fn authenticated_non_auth_page_reaffirms_location() {
        let decision = decide(Some(json!({"id": 1})), "/dashboard");
        assert_eq!(decision.navigate, "/dashboard");
    }

    #[test]
    fn authenticated_login_page_goes_home() {
        let decision = decide(Some(json!({"id": 1})), "/login");
        assert_eq!(decision.navigate, "/");

        let decision = decide(Some(json!({"id": 1})), "/signup");
        assert_eq!(decision.navigate, "/");
    }

    #[test]
    fn authenticated_callback_page_goes_home() {
        let decision = decide(Some(json!({"id": 1})), "/callback");
        assert_eq!(decision.navigate, "/");
    }

    #[test]
    fn unauthenticated_non_auth_page_gets_login_redirect() {
        let decision = decide(None, "/dashboard");
        assert_eq!(decision.navigate, "/login?redirect=/dashboard");
        assert!(!decision.patch.authenticated);
        assert!(decision.patch.user.is_none());
    }

    #[test]
    fn unauthenticated_auth_page_with_redirect_stays_put() {
        let decision = decide(None, "/callback?redirect=/dashboard");
        assert_eq!(decision.navigate, "/callback?redirect=/dashboard");
    }

    #[test]
    fn unauthenticated_auth_page_without_redirect_stays_put() {
        let decision = decide(None, "/login");
        assert_eq!(decision.navigate, "/login");
    }

    #[test]
    fn user_record_is_stored_on_success() {
        let user = json!({"id": "u1", "email": "u@example.com"});
        let decision = decide(Some(user.clone()), "/");
        assert_eq!(decision.patch.user, Some(user));
    }
}
