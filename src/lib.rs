//! # flowmastery
//!
//! Headless client for a task and workflow dashboard backed by a hosted
//! record gateway. The crate models the full page lifecycle: a one-time
//! authentication bootstrap driven by a hosted identity widget, typed CRUD
//! services over two record collections, and a view layer that gates
//! rendering on session state and surfaces every outcome as a one-line
//! notice.
//!
//! ## Layers
//!
//! - [`gateway`]: the wire protocol. Query and write payload types, the
//!   [`RecordGateway`](gateway::RecordGateway) transport trait, and an
//!   in-memory implementation for tests and development.
//! - [`schema`] / [`types`]: static field schemas per collection and the
//!   typed records, drafts, and patches built on them. Write payloads can
//!   only carry client-writable fields by construction.
//! - [`services`]: [`TaskService`](services::TaskService) and
//!   [`WorkflowService`](services::WorkflowService), one round trip per
//!   call, normalized into the crate error taxonomy.
//! - [`session`]: the bootstrap state machine. Interprets the widget's
//!   outcome, patches the session, navigates exactly once.
//! - [`app`]: routing, theming, notifications, and the
//!   [`AppShell`](app::AppShell) binding it all together.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use flowmastery::app::{AppShell, BufferedNotifier};
//! use flowmastery::gateway::InMemoryGateway;
//! use flowmastery::session::mock::{MockAuthWidget, RecordingNavigator};
//! use flowmastery::session::{Bootstrap, SessionHandle};
//! use flowmastery::types::Priority;
//! use serde_json::json;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let session = SessionHandle::new();
//! let navigator = Arc::new(RecordingNavigator::at("/"));
//! let bootstrap = Bootstrap::new(
//!     Arc::new(MockAuthWidget::authenticated(json!({"id": "u1"}))),
//!     navigator,
//!     session.clone(),
//! );
//! bootstrap.run().await;
//! assert!(session.is_authenticated());
//!
//! let mut shell = AppShell::new(
//!     session,
//!     Arc::new(InMemoryGateway::new()),
//!     Arc::new(BufferedNotifier::new()),
//! );
//! assert!(shell.add_task("Plan sprint", Priority::Medium).await);
//! # });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod error;
pub mod gateway;
pub mod schema;
pub mod services;
pub mod session;
pub mod types;

pub use error::{Error, GatewayError, Result};
pub use gateway::{GatewayConfig, InMemoryGateway, RecordGateway};
pub use schema::{FieldDescriptor, FieldVisibility, RecordSchema};
pub use session::SessionHandle;
pub use types::{Priority, RecordId, StatusFilter, Task, TaskStats, Workflow};
