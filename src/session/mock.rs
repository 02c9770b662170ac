//! Mock identity widget and navigator for development and testing.
//!
//! [`MockAuthWidget`] always reports a configurable outcome, and
//! [`RecordingNavigator`] captures every navigation the bootstrap issues.
//! **Never use in production.**
//!
//! # Examples
//!
//! ```
//! use flowmastery::session::mock::{MockAuthWidget, RecordingNavigator};
//! use flowmastery::session::Navigator;
//! use serde_json::json;
//!
//! let widget = MockAuthWidget::authenticated(json!({"id": "u1"}));
//! let navigator = RecordingNavigator::at("/dashboard");
//! assert_eq!(navigator.location(), "/dashboard");
//! ```

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::session::bootstrap::{AuthEvent, AuthWidget, Navigator};

/// Identity widget that reports a preset outcome.
#[derive(Debug)]
pub struct MockAuthWidget {
    event: AuthEvent,
    fail_logout: Option<String>,
}

impl MockAuthWidget {
    /// A widget that reports an authenticated user.
    pub fn authenticated(user: Value) -> Self {
        Self {
            event: AuthEvent::Outcome(Some(user)),
            fail_logout: None,
        }
    }

    /// A widget that reports no session.
    pub fn unauthenticated() -> Self {
        Self {
            event: AuthEvent::Outcome(None),
            fail_logout: None,
        }
    }

    /// A widget that fails its own check.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            event: AuthEvent::Error(message.into()),
            fail_logout: None,
        }
    }

    /// Makes `logout` fail with the given message.
    pub fn with_failing_logout(mut self, message: impl Into<String>) -> Self {
        self.fail_logout = Some(message.into());
        self
    }
}

#[async_trait]
impl AuthWidget for MockAuthWidget {
    async fn watch(&self) -> AuthEvent {
        self.event.clone()
    }

    async fn logout(&self) -> Result<()> {
        match &self.fail_logout {
            Some(message) => Err(Error::Auth(message.clone())),
            None => Ok(()),
        }
    }
}

/// Navigator that holds a mutable location and records every navigation.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    location: Mutex<String>,
    navigations: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// A navigator positioned at `location`.
    pub fn at(location: impl Into<String>) -> Self {
        Self {
            location: Mutex::new(location.into()),
            navigations: Mutex::new(Vec::new()),
        }
    }

    /// Every target navigated to, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().clone()
    }

    /// Repositions the navigator without recording a navigation.
    pub fn set_location(&self, location: impl Into<String>) {
        *self.location.lock() = location.into();
    }
}

impl Navigator for RecordingNavigator {
    fn location(&self) -> String {
        self.location.lock().clone()
    }

    fn navigate(&self, target: &str) {
        *self.location.lock() = target.to_string();
        self.navigations.lock().push(target.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn widget_replays_its_event() {
        let widget = MockAuthWidget::authenticated(json!({"id": 1}));
        assert_eq!(
            widget.watch().await,
            AuthEvent::Outcome(Some(json!({"id": 1})))
        );

        let widget = MockAuthWidget::failing("offline");
        assert_eq!(widget.watch().await, AuthEvent::Error("offline".to_string()));
    }

    #[tokio::test]
    async fn logout_failure_is_configurable() {
        let widget = MockAuthWidget::unauthenticated().with_failing_logout("token expired");
        let err = widget.logout().await.unwrap_err();
        assert!(err.to_string().contains("token expired"));
    }

    #[test]
    fn navigator_records_and_moves() {
        let navigator = RecordingNavigator::at("/a");
        navigator.navigate("/b");
        navigator.navigate("/c");
        assert_eq!(navigator.location(), "/c");
        assert_eq!(navigator.navigations(), vec!["/b", "/c"]);
    }
}
