//! Workflow record types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::{FieldDescriptor, RecordSchema};
use crate::types::RecordId;

const WORKFLOW_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::updateable("Name"),
    FieldDescriptor::updateable("Tags"),
    FieldDescriptor::updateable("Owner"),
    FieldDescriptor::system("CreatedOn"),
    FieldDescriptor::system("CreatedBy"),
    FieldDescriptor::system("ModifiedOn"),
    FieldDescriptor::system("ModifiedBy"),
    FieldDescriptor::updateable("active"),
];

/// A workflow as held by the client. The dashboard only ever reads a list
/// and an active count, and creates new entries; no inline edit surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    /// Gateway-assigned identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Whether the workflow is currently active.
    pub active: bool,
}

impl RecordSchema for Workflow {
    const COLLECTION: &'static str = "workflow1";
    const FIELDS: &'static [FieldDescriptor] = WORKFLOW_FIELDS;
}

impl Workflow {
    /// Projects a gateway record into a `Workflow`. Returns `None` when the
    /// record has no usable id or name; the caller skips the row.
    pub fn from_record(record: &Map<String, Value>) -> Option<Self> {
        let id = record.get("Id").and_then(Value::as_i64)?;
        let name = record.get("Name").and_then(Value::as_str)?.to_string();
        let active = record
            .get("active")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Some(Self { id, name, active })
    }
}

/// Write payload for creating a workflow. Only client-writable fields exist
/// on this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowDraft {
    /// Display name.
    pub name: String,
    /// Whether the workflow starts active.
    pub active: bool,
}

impl WorkflowDraft {
    /// Creates a draft that starts active.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
        }
    }

    /// Sets the initial active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Builds the wire record. Emits only updateable fields.
    pub fn into_record(self) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert("Name".to_string(), Value::String(self.name));
        record.insert("active".to_string(), Value::Bool(self.active));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_record_defaults_active_to_false() {
        let record = json!({"Id": 5, "Name": "Onboarding"});
        let workflow = Workflow::from_record(record.as_object().unwrap()).unwrap();
        assert_eq!(workflow.name, "Onboarding");
        assert!(!workflow.active);
    }

    #[test]
    fn from_record_requires_id_and_name() {
        let record = json!({"Name": "no id"});
        assert!(Workflow::from_record(record.as_object().unwrap()).is_none());
        let record = json!({"Id": 2});
        assert!(Workflow::from_record(record.as_object().unwrap()).is_none());
    }

    #[test]
    fn draft_record_contains_only_updateable_fields() {
        let record = WorkflowDraft::new("Review").with_active(false).into_record();
        for key in record.keys() {
            assert!(Workflow::is_updateable(key), "{key} is not updateable");
        }
        assert_eq!(record["active"], json!(false));
    }
}
