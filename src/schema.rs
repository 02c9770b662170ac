//! Static field schemas for gateway collections.
//!
//! Every record collection exposed by the hosted gateway carries a fixed set
//! of fields, each either client-writable or gateway-managed. The
//! [`RecordSchema`] trait binds a domain type to its collection name and
//! field table; services use [`all_fields`](RecordSchema::all_fields) to
//! request the full projection on reads, and the typed draft/patch types in
//! [`types`](crate::types) guarantee by construction that writes only ever
//! carry [`Updateable`](FieldVisibility::Updateable) fields.
//!
//! The audit fields (`CreatedOn`, `CreatedBy`, `ModifiedOn`, `ModifiedBy`)
//! are populated by the gateway and must never appear in a create or update
//! payload.

/// Write-eligibility of a gateway field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldVisibility {
    /// The client may send this field on create/update.
    Updateable,
    /// Read-only audit metadata populated by the gateway.
    System,
}

/// A gateway field paired with its write-eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The field name as it appears on the wire.
    pub name: &'static str,
    /// Whether the client may write this field.
    pub visibility: FieldVisibility,
}

impl FieldDescriptor {
    /// Shorthand for an [`Updateable`](FieldVisibility::Updateable) field.
    pub const fn updateable(name: &'static str) -> Self {
        Self {
            name,
            visibility: FieldVisibility::Updateable,
        }
    }

    /// Shorthand for a [`System`](FieldVisibility::System) field.
    pub const fn system(name: &'static str) -> Self {
        Self {
            name,
            visibility: FieldVisibility::System,
        }
    }
}

/// Audit fields shared by every gateway collection.
pub const AUDIT_FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor::system("CreatedOn"),
    FieldDescriptor::system("CreatedBy"),
    FieldDescriptor::system("ModifiedOn"),
    FieldDescriptor::system("ModifiedBy"),
];

/// Binds a domain type to its gateway collection and field table.
///
/// # Examples
///
/// ```
/// use flowmastery::schema::RecordSchema;
/// use flowmastery::types::Task;
///
/// assert_eq!(Task::COLLECTION, "task2");
/// assert!(Task::all_fields().contains(&"title"));
/// assert!(Task::updateable_fields().contains(&"priority"));
/// assert!(!Task::updateable_fields().contains(&"CreatedOn"));
/// ```
pub trait RecordSchema {
    /// The gateway collection name.
    const COLLECTION: &'static str;

    /// The full field table for this collection.
    const FIELDS: &'static [FieldDescriptor];

    /// All field names, for read projections.
    fn all_fields() -> Vec<&'static str> {
        Self::FIELDS.iter().map(|f| f.name).collect()
    }

    /// Names of the fields the client may write.
    fn updateable_fields() -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .filter(|f| f.visibility == FieldVisibility::Updateable)
            .map(|f| f.name)
            .collect()
    }

    /// Returns `true` if `name` is a writable field of this collection.
    fn is_updateable(name: &str) -> bool {
        Self::FIELDS
            .iter()
            .any(|f| f.name == name && f.visibility == FieldVisibility::Updateable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Task, Workflow};

    #[test]
    fn audit_fields_are_never_updateable() {
        for field in &AUDIT_FIELDS {
            assert_eq!(field.visibility, FieldVisibility::System);
            assert!(!Task::is_updateable(field.name));
            assert!(!Workflow::is_updateable(field.name));
        }
    }

    #[test]
    fn all_fields_includes_system_fields() {
        let all = Task::all_fields();
        assert!(all.contains(&"ModifiedOn"));
        assert!(all.contains(&"title"));

        let writable = Task::updateable_fields();
        assert!(writable.contains(&"title"));
        assert!(writable.contains(&"completed"));
        assert!(!writable.contains(&"ModifiedOn"));
    }
}
