//! Deterministic in-memory gateway for tests and local development.
//!
//! [`InMemoryGateway`] implements the full [`RecordGateway`] contract against
//! process-local state: monotonic id assignment, audit-field stamping,
//! `Contains`/`ExactMatch` filtering with AND semantics, ordering, and
//! paging. It contains no domain knowledge of tasks or workflows; it stores
//! whatever records callers write.
//!
//! Failure injection covers both error layers: [`reject_next_write`]
//! produces a completed round trip whose result lacks a success indicator
//! (exercising the operation-failure path), and [`set_unavailable`] makes
//! every call fail at the transport layer.
//!
//! [`reject_next_write`]: InMemoryGateway::reject_next_write
//! [`set_unavailable`]: InMemoryGateway::set_unavailable

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering as AtomicOrdering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::{Map, Value};

use crate::error::GatewayError;
use crate::gateway::types::{
    DeleteRequest, DeleteResponse, FetchResponse, FilterOperator, QueryParams, SortDirection,
    WhereClause, WriteRequest, WriteResponse, WriteResult,
};
use crate::gateway::RecordGateway;

/// Identity stamped into the audit fields of records written through this
/// gateway.
const LOCAL_ACTOR: &str = "local";

/// In-memory [`RecordGateway`] implementation.
///
/// # Examples
///
/// ```
/// use flowmastery::gateway::types::{QueryParams, WriteRequest};
/// use flowmastery::gateway::{InMemoryGateway, RecordGateway};
/// use serde_json::json;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let gateway = InMemoryGateway::new();
/// let record = json!({"title": "hello"}).as_object().cloned().unwrap();
/// let response = gateway
///     .create_record("task2", WriteRequest::single(record))
///     .await
///     .unwrap();
/// assert!(response.results[0].success);
///
/// let params = QueryParams {
///     fields: vec!["title".to_string()],
///     ..QueryParams::default()
/// };
/// let fetched = gateway.fetch_records("task2", params).await.unwrap();
/// assert_eq!(fetched.data.len(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    collections: DashMap<String, Vec<Map<String, Value>>>,
    next_id: AtomicI64,
    reject_writes: DashMap<String, String>,
    unavailable: AtomicBool,
}

impl InMemoryGateway {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    /// Makes the next create/update on `collection` complete with a failed
    /// per-record result carrying `message`.
    pub fn reject_next_write(&self, collection: &str, message: impl Into<String>) {
        self.reject_writes
            .insert(collection.to_string(), message.into());
    }

    /// Toggles a transport-level outage: while set, every call returns
    /// [`GatewayError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable
            .store(unavailable, AtomicOrdering::SeqCst);
    }

    /// Number of records stored in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map_or(0, |records| records.len())
    }

    /// Returns `true` if `collection` holds no records.
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn check_available(&self) -> Result<(), GatewayError> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(GatewayError::Unavailable(
                "gateway is offline".to_string(),
            ));
        }
        Ok(())
    }

    fn take_rejection(&self, collection: &str) -> Option<String> {
        self.reject_writes
            .remove(collection)
            .map(|(_, message)| message)
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, AtomicOrdering::SeqCst)
    }
}

fn clause_matches(clause: &WhereClause, record: &Map<String, Value>) -> bool {
    let field = record.get(&clause.field_name);
    match clause.operator {
        FilterOperator::Contains => {
            let Some(haystack) = field.and_then(Value::as_str) else {
                return false;
            };
            let haystack = haystack.to_lowercase();
            clause.values.iter().any(|needle| {
                needle
                    .as_str()
                    .is_some_and(|n| haystack.contains(&n.to_lowercase()))
            })
        },
        FilterOperator::ExactMatch => clause.values.iter().any(|value| field == Some(value)),
    }
}

/// Total order over JSON values, enough for ordering on timestamps, numbers,
/// and names. Mixed types compare by type tag, mirroring what a remote sort
/// on a typed column would never produce anyway.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// Projects a stored record to the requested fields. `Id` is always
/// included, matching the hosted service's behavior.
fn project(record: &Map<String, Value>, fields: &[String]) -> Map<String, Value> {
    let mut projected = Map::new();
    if let Some(id) = record.get("Id") {
        projected.insert("Id".to_string(), id.clone());
    }
    for field in fields {
        if field == "Id" {
            continue;
        }
        if let Some(value) = record.get(field) {
            projected.insert(field.clone(), value.clone());
        }
    }
    projected
}

#[async_trait]
impl RecordGateway for InMemoryGateway {
    async fn fetch_records(
        &self,
        collection: &str,
        params: QueryParams,
    ) -> Result<FetchResponse, GatewayError> {
        self.check_available()?;

        let mut matched: Vec<Map<String, Value>> = self
            .collections
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| {
                        params
                            .filters
                            .iter()
                            .all(|clause| clause_matches(clause, record))
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        for order in params.order_by.iter().rev() {
            matched.sort_by(|a, b| {
                let ordering = compare_values(a.get(&order.field), b.get(&order.field));
                match order.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let paging = params.paging_info.unwrap_or_default();
        let data = matched
            .into_iter()
            .skip(paging.offset)
            .take(paging.limit)
            .map(|record| project(&record, &params.fields))
            .collect();

        Ok(FetchResponse { data })
    }

    async fn create_record(
        &self,
        collection: &str,
        request: WriteRequest,
    ) -> Result<WriteResponse, GatewayError> {
        self.check_available()?;

        if let Some(message) = self.take_rejection(collection) {
            let results = request
                .records
                .iter()
                .map(|_| WriteResult {
                    success: false,
                    data: None,
                    message: Some(message.clone()),
                })
                .collect();
            return Ok(WriteResponse { results });
        }

        let now = Utc::now().to_rfc3339();
        let mut results = Vec::with_capacity(request.records.len());
        let mut stored = self.collections.entry(collection.to_string()).or_default();

        for mut record in request.records {
            record.insert("Id".to_string(), Value::from(self.allocate_id()));
            record.insert("CreatedOn".to_string(), Value::String(now.clone()));
            record.insert(
                "CreatedBy".to_string(),
                Value::String(LOCAL_ACTOR.to_string()),
            );
            record.insert("ModifiedOn".to_string(), Value::String(now.clone()));
            record.insert(
                "ModifiedBy".to_string(),
                Value::String(LOCAL_ACTOR.to_string()),
            );

            stored.push(record.clone());
            results.push(WriteResult {
                success: true,
                data: Some(record),
                message: None,
            });
        }

        Ok(WriteResponse { results })
    }

    async fn update_record(
        &self,
        collection: &str,
        request: WriteRequest,
    ) -> Result<WriteResponse, GatewayError> {
        self.check_available()?;

        if let Some(message) = self.take_rejection(collection) {
            let results = request
                .records
                .iter()
                .map(|_| WriteResult {
                    success: false,
                    data: None,
                    message: Some(message.clone()),
                })
                .collect();
            return Ok(WriteResponse { results });
        }

        let now = Utc::now().to_rfc3339();
        let mut results = Vec::with_capacity(request.records.len());
        let mut stored = self.collections.entry(collection.to_string()).or_default();

        for patch in request.records {
            let Some(id) = patch.get("Id").and_then(Value::as_i64) else {
                results.push(WriteResult {
                    success: false,
                    data: None,
                    message: Some("record id is required".to_string()),
                });
                continue;
            };

            let existing = stored
                .iter_mut()
                .find(|record| record.get("Id").and_then(Value::as_i64) == Some(id));

            match existing {
                Some(record) => {
                    for (key, value) in &patch {
                        if key == "Id" {
                            continue;
                        }
                        record.insert(key.clone(), value.clone());
                    }
                    record.insert("ModifiedOn".to_string(), Value::String(now.clone()));
                    record.insert(
                        "ModifiedBy".to_string(),
                        Value::String(LOCAL_ACTOR.to_string()),
                    );
                    results.push(WriteResult {
                        success: true,
                        data: Some(record.clone()),
                        message: None,
                    });
                },
                None => results.push(WriteResult {
                    success: false,
                    data: None,
                    message: Some(format!("record not found: {id}")),
                }),
            }
        }

        Ok(WriteResponse { results })
    }

    async fn delete_record(
        &self,
        collection: &str,
        request: DeleteRequest,
    ) -> Result<DeleteResponse, GatewayError> {
        self.check_available()?;

        let mut stored = self.collections.entry(collection.to_string()).or_default();
        let mut all_found = true;

        for id in &request.record_ids {
            let before = stored.len();
            stored.retain(|record| record.get("Id").and_then(Value::as_i64) != Some(*id));
            if stored.len() == before {
                all_found = false;
            }
        }

        Ok(DeleteResponse { success: all_found })
    }
}
