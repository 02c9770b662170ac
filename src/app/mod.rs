//! Headless view layer: routing, theming, notifications, and the
//! application shell that binds session state to the entity services.

pub mod notify;
pub mod router;
pub mod shell;
pub mod theme;

pub use notify::{BufferedNotifier, Notice, NoticeLevel, Notifier};
pub use router::Route;
pub use shell::{AppShell, DashboardStats, RenderState};
pub use theme::{MemoryPreferences, PreferenceStore, Theme, ThemeManager};
