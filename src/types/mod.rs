//! Domain types for the two dashboard collections.
//!
//! Records are owned by the remote gateway; the client holds transient
//! projections fetched on demand. Read projection is deliberately lenient
//! (missing fields fall back to defaults, unparsable rows are skipped) while
//! write payloads are built from typed drafts that can only emit
//! client-writable fields.

mod task;
mod workflow;

pub use task::{Priority, StatusFilter, Task, TaskDraft, TaskPatch, TaskStats};
pub use workflow::{Workflow, WorkflowDraft};

/// Gateway-assigned record identifier.
pub type RecordId = i64;
