//! Wire types for the record gateway.
//!
//! These serialize to the exact JSON shapes the hosted SDK accepts and
//! returns: camelCase keys, a `where` array of field predicates, and
//! per-record write results. Records themselves travel as untyped JSON
//! objects; the typed projection lives in [`types`](crate::types).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Filter operator for a [`WhereClause`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    /// Case-insensitive substring match on a text field.
    Contains,
    /// Exact equality match.
    ExactMatch,
}

/// A single field predicate. Multiple clauses combine with logical AND.
///
/// # Examples
///
/// ```
/// use flowmastery::gateway::types::{FilterOperator, WhereClause};
/// use serde_json::json;
///
/// let clause = WhereClause::contains("title", "report");
/// assert_eq!(clause.operator, FilterOperator::Contains);
///
/// let clause = WhereClause::exact_match("completed", json!(true));
/// let wire = serde_json::to_value(&clause).unwrap();
/// assert_eq!(wire["fieldName"], "completed");
/// assert_eq!(wire["operator"], "ExactMatch");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhereClause {
    /// The field the predicate applies to.
    pub field_name: String,
    /// How values are matched.
    pub operator: FilterOperator,
    /// Candidate values; a record matches if any value matches.
    pub values: Vec<Value>,
}

impl WhereClause {
    /// Substring predicate on a text field.
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self {
            field_name: field.into(),
            operator: FilterOperator::Contains,
            values: vec![Value::String(needle.into())],
        }
    }

    /// Exact-equality predicate.
    pub fn exact_match(field: impl Into<String>, value: Value) -> Self {
        Self {
            field_name: field.into(),
            operator: FilterOperator::ExactMatch,
            values: vec![value],
        }
    }
}

/// Sort direction for [`OrderBy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending.
    #[serde(rename = "ASC")]
    Asc,
    /// Descending.
    #[serde(rename = "DESC")]
    Desc,
}

/// A sort key for fetch queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// The field to sort on.
    pub field: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl OrderBy {
    /// Descending sort on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Result-window parameters for fetch queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingInfo {
    /// Maximum number of records to return.
    pub limit: usize,
    /// Number of records to skip.
    pub offset: usize,
}

impl Default for PagingInfo {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
        }
    }
}

/// Query parameters for `fetchRecords`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    /// Fields to project into the result rows.
    pub fields: Vec<String>,
    /// AND-combined field predicates.
    #[serde(rename = "where", skip_serializing_if = "Vec::is_empty", default)]
    pub filters: Vec<WhereClause>,
    /// Sort keys, applied in order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub order_by: Vec<OrderBy>,
    /// Result window.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub paging_info: Option<PagingInfo>,
}

/// Response from `fetchRecords`: the projected rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    /// Matched records, projected to the requested fields.
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
}

/// Request body for `createRecord`/`updateRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteRequest {
    /// The records to write. Updates carry their `Id` inline.
    pub records: Vec<Map<String, Value>>,
}

impl WriteRequest {
    /// A request writing a single record.
    pub fn single(record: Map<String, Value>) -> Self {
        Self {
            records: vec![record],
        }
    }
}

/// Per-record outcome inside a [`WriteResponse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteResult {
    /// Whether the write succeeded.
    #[serde(default)]
    pub success: bool,
    /// The stored record after the write, when successful.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<Map<String, Value>>,
    /// Failure message, when unsuccessful.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

/// Response from `createRecord`/`updateRecord`: one result per input record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteResponse {
    /// Per-record outcomes, in input order.
    #[serde(default)]
    pub results: Vec<WriteResult>,
}

/// Request body for `deleteRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// Ids of the records to delete.
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<i64>,
}

impl DeleteRequest {
    /// A request deleting a single record.
    pub fn single(id: i64) -> Self {
        Self {
            record_ids: vec![id],
        }
    }
}

/// Response from `deleteRecord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Whether every requested record was deleted.
    #[serde(default)]
    pub success: bool,
}
