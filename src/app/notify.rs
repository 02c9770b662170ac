//! Transient user-visible notifications.
//!
//! Every error in the system is surfaced as a one-line notice and otherwise
//! swallowed; there is no structured recovery. The [`Notifier`] trait is the
//! seam the host UI implements (a toast container, a status line); tests use
//! [`BufferedNotifier`].

use parking_lot::Mutex;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Operation confirmed.
    Success,
    /// Neutral information.
    Info,
    /// Operation failed.
    Error,
}

/// A one-line transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// The message shown to the user.
    pub message: String,
}

/// Sink for transient notifications.
pub trait Notifier: Send + Sync {
    /// Emits a notice.
    fn notify(&self, notice: Notice);

    /// Emits a success notice.
    fn success(&self, message: &str) {
        self.notify(Notice {
            level: NoticeLevel::Success,
            message: message.to_string(),
        });
    }

    /// Emits an informational notice.
    fn info(&self, message: &str) {
        self.notify(Notice {
            level: NoticeLevel::Info,
            message: message.to_string(),
        });
    }

    /// Emits an error notice.
    fn error(&self, message: &str) {
        self.notify(Notice {
            level: NoticeLevel::Error,
            message: message.to_string(),
        });
    }
}

/// Notifier that buffers notices in memory.
///
/// # Examples
///
/// ```
/// use flowmastery::app::notify::{BufferedNotifier, Notifier, NoticeLevel};
///
/// let notifier = BufferedNotifier::new();
/// notifier.success("Task added successfully");
/// let notices = notifier.drain();
/// assert_eq!(notices.len(), 1);
/// assert_eq!(notices[0].level, NoticeLevel::Success);
/// ```
#[derive(Debug, Default)]
pub struct BufferedNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl BufferedNotifier {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes all buffered notices, leaving the buffer empty.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock())
    }

    /// A copy of the buffered notices.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }
}

impl Notifier for BufferedNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_buffer() {
        let notifier = BufferedNotifier::new();
        notifier.error("Failed to load tasks");
        notifier.info("Task removed");

        let notices = notifier.drain();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(notifier.notices().is_empty());
    }
}
