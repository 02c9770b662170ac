//! Task record types: domain struct, write drafts, filters, and statistics.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::schema::{FieldDescriptor, RecordSchema};
use crate::types::RecordId;

/// Field table for the `task2` collection, including the gateway audit
/// fields. The read projection requests all of these; write payloads are
/// restricted to the updateable subset by construction.
const TASK_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::updateable("Name"),
    FieldDescriptor::updateable("Tags"),
    FieldDescriptor::updateable("Owner"),
    FieldDescriptor::system("CreatedOn"),
    FieldDescriptor::system("CreatedBy"),
    FieldDescriptor::system("ModifiedOn"),
    FieldDescriptor::system("ModifiedBy"),
    FieldDescriptor::updateable("title"),
    FieldDescriptor::updateable("completed"),
    FieldDescriptor::updateable("priority"),
];

/// Task priority level.
///
/// Serializes as the lowercase wire value (`"low"`, `"medium"`, `"high"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority (the default for new tasks).
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// The lowercase wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a wire value, returning `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// A task as held by the client: a transient, possibly stale projection of
/// the gateway record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Gateway-assigned identifier.
    pub id: RecordId,
    /// Display title.
    pub title: String,
    /// Completion flag.
    pub completed: bool,
    /// Priority level.
    pub priority: Priority,
}

impl RecordSchema for Task {
    const COLLECTION: &'static str = "task2";
    const FIELDS: &'static [FieldDescriptor] = TASK_FIELDS;
}

impl Task {
    /// Projects a gateway record into a `Task`.
    ///
    /// Lenient on purpose: `title` falls back to the collection's `Name`
    /// field, `completed` defaults to `false`, `priority` defaults to
    /// medium. Returns `None` when the record has no usable id or title,
    /// and the caller skips the row.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowmastery::types::{Priority, Task};
    /// use serde_json::json;
    ///
    /// let record = json!({"Id": 7, "Name": "Ship release"});
    /// let task = Task::from_record(record.as_object().unwrap()).unwrap();
    /// assert_eq!(task.title, "Ship release");
    /// assert!(!task.completed);
    /// assert_eq!(task.priority, Priority::Medium);
    /// ```
    pub fn from_record(record: &Map<String, Value>) -> Option<Self> {
        let id = record.get("Id").and_then(Value::as_i64)?;
        let title = record
            .get("title")
            .and_then(Value::as_str)
            .or_else(|| record.get("Name").and_then(Value::as_str))?
            .to_string();
        let completed = record
            .get("completed")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let priority = record
            .get("priority")
            .and_then(Value::as_str)
            .and_then(Priority::parse)
            .unwrap_or_default();

        Some(Self {
            id,
            title,
            completed,
            priority,
        })
    }

    /// Case-insensitive substring match on the title.
    pub fn matches_search(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Completion filter for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No completion filter.
    #[default]
    All,
    /// Only tasks with `completed = false`.
    Active,
    /// Only tasks with `completed = true`.
    Completed,
}

impl StatusFilter {
    /// The completion value this filter matches, or `None` for [`All`](Self::All).
    pub fn completed_value(&self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(false),
            Self::Completed => Some(true),
        }
    }

    /// Returns `true` if a task with the given completion flag passes.
    pub fn accepts(&self, completed: bool) -> bool {
        self.completed_value().is_none_or(|want| want == completed)
    }
}

/// Write payload for creating a task.
///
/// Only client-writable fields exist on this type, so the create payload
/// cannot carry a system field regardless of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Display title. Also written to the collection's `Name` field, which
    /// the gateway uses as the record label.
    pub title: String,
    /// Initial completion flag.
    pub completed: bool,
    /// Initial priority.
    pub priority: Priority,
}

impl TaskDraft {
    /// Creates a draft with the default `completed = false`, medium priority.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
            priority: Priority::default(),
        }
    }

    /// Sets the initial priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the initial completion flag.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Builds the wire record. Emits only updateable fields.
    pub fn into_record(self) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert("Name".to_string(), Value::String(self.title.clone()));
        record.insert("title".to_string(), Value::String(self.title));
        record.insert("completed".to_string(), Value::Bool(self.completed));
        record.insert(
            "priority".to_string(),
            Value::String(self.priority.as_str().to_string()),
        );
        record
    }
}

/// Partial update for an existing task.
///
/// Absent fields are not sent; the gateway leaves them untouched. The id is
/// optional so the missing-id case can be rejected with a validation error
/// before any round trip, per the service contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// The record to update. Required; checked before any remote call.
    pub id: Option<RecordId>,
    /// New title, if changing.
    pub title: Option<String>,
    /// New completion flag, if changing.
    pub completed: Option<bool>,
    /// New priority, if changing.
    pub priority: Option<Priority>,
}

impl TaskPatch {
    /// Creates an empty patch targeting `id`.
    pub fn new(id: RecordId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the completion flag.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Builds the wire record (without the id, which travels alongside).
    /// Emits only updateable fields that are actually set.
    pub fn into_record(self) -> Map<String, Value> {
        let mut record = Map::new();
        if let Some(title) = self.title {
            record.insert("Name".to_string(), Value::String(title.clone()));
            record.insert("title".to_string(), Value::String(title));
        }
        if let Some(completed) = self.completed {
            record.insert("completed".to_string(), Value::Bool(completed));
        }
        if let Some(priority) = self.priority {
            record.insert(
                "priority".to_string(),
                Value::String(priority.as_str().to_string()),
            );
        }
        record
    }
}

/// Aggregate task statistics for the dashboard stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskStats {
    /// Total number of tasks.
    pub total_tasks: usize,
    /// Number of completed tasks.
    pub tasks_completed: usize,
    /// Number of high-priority tasks.
    pub high_priority_count: usize,
    /// Completed share as a rounded percentage, 0 when there are no tasks.
    pub productivity: u32,
}

impl TaskStats {
    /// Rounded completion percentage. Zero when `total` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowmastery::types::TaskStats;
    ///
    /// assert_eq!(TaskStats::productivity_of(0, 0), 0);
    /// assert_eq!(TaskStats::productivity_of(1, 3), 33);
    /// assert_eq!(TaskStats::productivity_of(2, 3), 67);
    /// assert_eq!(TaskStats::productivity_of(3, 3), 100);
    /// ```
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[allow(clippy::cast_precision_loss)]
    pub fn productivity_of(completed: usize, total: usize) -> u32 {
        if total == 0 {
            return 0;
        }
        ((completed as f64 / total as f64) * 100.0).round() as u32
    }
}
