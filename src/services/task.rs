//! Task entity service.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::gateway::types::{
    DeleteRequest, OrderBy, PagingInfo, QueryParams, WhereClause, WriteRequest,
};
use crate::gateway::RecordGateway;
use crate::schema::RecordSchema;
use crate::services::first_write_result;
use crate::types::{Priority, RecordId, StatusFilter, Task, TaskDraft, TaskPatch, TaskStats};

/// Window used by the statistics projections.
const STATS_LIMIT: usize = 1000;

/// Search and filter options for [`TaskService::list`].
///
/// Predicates combine with logical AND when more than one is supplied.
#[derive(Debug, Clone, Default)]
pub struct TaskListOptions {
    /// Case-insensitive substring match on the title. Empty means no search.
    pub search_term: String,
    /// Completion filter.
    pub status: StatusFilter,
    /// Exact priority filter.
    pub priority: Option<Priority>,
}

/// CRUD operations on the task collection.
///
/// Each call issues one round trip ([`stats`](Self::stats) issues two) and
/// normalizes the outcome per the crate error taxonomy. No batching, no
/// retry, no cache.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use flowmastery::gateway::InMemoryGateway;
/// use flowmastery::services::{TaskListOptions, TaskService};
/// use flowmastery::types::TaskDraft;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let service = TaskService::new(Arc::new(InMemoryGateway::new()));
/// let created = service.create(TaskDraft::new("Ship release")).await.unwrap();
/// let tasks = service.list(&TaskListOptions::default()).await.unwrap();
/// assert_eq!(tasks, vec![created]);
/// # });
/// ```
#[derive(Clone)]
pub struct TaskService {
    gateway: Arc<dyn RecordGateway>,
}

impl TaskService {
    /// Creates a service over the given gateway.
    pub fn new(gateway: Arc<dyn RecordGateway>) -> Self {
        Self { gateway }
    }

    /// Fetches tasks matching `options`, most recently modified first.
    ///
    /// Requests the full field projection, orders by `ModifiedOn`
    /// descending, and windows to the first 100 records. Rows that cannot
    /// be projected into a [`Task`] are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] when the round trip fails.
    pub async fn list(&self, options: &TaskListOptions) -> Result<Vec<Task>> {
        let mut filters = Vec::new();
        if !options.search_term.is_empty() {
            filters.push(WhereClause::contains("title", &options.search_term));
        }
        if let Some(completed) = options.status.completed_value() {
            filters.push(WhereClause::exact_match("completed", json!(completed)));
        }
        if let Some(priority) = options.priority {
            filters.push(WhereClause::exact_match(
                "priority",
                json!(priority.as_str()),
            ));
        }

        let params = QueryParams {
            fields: Task::all_fields().iter().map(ToString::to_string).collect(),
            filters,
            order_by: vec![OrderBy::desc("ModifiedOn")],
            paging_info: Some(PagingInfo::default()),
        };
        debug!(collection = Task::COLLECTION, ?options, "fetching tasks");

        let response = self
            .gateway
            .fetch_records(Task::COLLECTION, params)
            .await
            .map_err(|err| {
                error!(error = %err, "failed to fetch tasks");
                Error::Network(err)
            })?;

        Ok(response
            .data
            .iter()
            .filter_map(Task::from_record)
            .collect())
    }

    /// Computes aggregate statistics for the dashboard stat cards.
    ///
    /// Issues two projections: one over the `completed` flag (total and
    /// completed counts, productivity percentage) and one counting
    /// high-priority tasks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] when either round trip fails.
    pub async fn stats(&self) -> Result<TaskStats> {
        let completed_params = QueryParams {
            fields: vec!["completed".to_string()],
            paging_info: Some(PagingInfo {
                limit: STATS_LIMIT,
                offset: 0,
            }),
            ..QueryParams::default()
        };
        let tasks = self
            .gateway
            .fetch_records(Task::COLLECTION, completed_params)
            .await?;

        let total_tasks = tasks.data.len();
        let tasks_completed = tasks
            .data
            .iter()
            .filter(|record| {
                record
                    .get("completed")
                    .and_then(Value::as_bool)
                    .unwrap_or(false)
            })
            .count();

        let high_params = QueryParams {
            fields: vec!["priority".to_string()],
            filters: vec![WhereClause::exact_match("priority", json!("high"))],
            paging_info: Some(PagingInfo {
                limit: STATS_LIMIT,
                offset: 0,
            }),
            ..QueryParams::default()
        };
        let high = self
            .gateway
            .fetch_records(Task::COLLECTION, high_params)
            .await?;

        Ok(TaskStats {
            total_tasks,
            tasks_completed,
            high_priority_count: high.data.len(),
            productivity: TaskStats::productivity_of(tasks_completed, total_tasks),
        })
    }

    /// Creates a task from `draft`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] when the round trip fails and
    /// [`Error::Operation`] when the gateway result lacks a success
    /// indicator.
    pub async fn create(&self, draft: TaskDraft) -> Result<Task> {
        let response = self
            .gateway
            .create_record(Task::COLLECTION, WriteRequest::single(draft.into_record()))
            .await?;

        let record = first_write_result(Task::COLLECTION, response, "failed to create task")?;
        Task::from_record(&record).ok_or_else(|| Error::Operation {
            collection: Task::COLLECTION.to_string(),
            message: "gateway returned a malformed record".to_string(),
        })
    }

    /// Applies `patch` to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] before any remote call when the patch
    /// has no id; otherwise as [`create`](Self::create).
    pub async fn update(&self, patch: TaskPatch) -> Result<Task> {
        let id = patch
            .id
            .ok_or_else(|| Error::Validation("a task id is required for update".to_string()))?;

        let mut record = patch.into_record();
        record.insert("Id".to_string(), json!(id));

        let response = self
            .gateway
            .update_record(Task::COLLECTION, WriteRequest::single(record))
            .await?;

        let record = first_write_result(Task::COLLECTION, response, "failed to update task")?;
        Task::from_record(&record).ok_or_else(|| Error::Operation {
            collection: Task::COLLECTION.to_string(),
            message: "gateway returned a malformed record".to_string(),
        })
    }

    /// Deletes the task with the given id.
    ///
    /// Returns the gateway's success indicator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] before any remote call when `id` is
    /// not a valid record id.
    pub async fn delete(&self, id: RecordId) -> Result<bool> {
        if id <= 0 {
            return Err(Error::Validation(
                "a task id is required for delete".to_string(),
            ));
        }

        let response = self
            .gateway
            .delete_record(Task::COLLECTION, DeleteRequest::single(id))
            .await?;
        Ok(response.success)
    }
}

impl std::fmt::Debug for TaskService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::InMemoryGateway;
    use pretty_assertions::assert_eq;

    fn service() -> (Arc<InMemoryGateway>, TaskService) {
        let gateway = Arc::new(InMemoryGateway::new());
        let service = TaskService::new(gateway.clone());
        (gateway, service)
    }

    #[tokio::test]
    async fn create_then_list_round_trip() {
        let (_, service) = service();
        let created = service
            .create(TaskDraft::new("Write report").with_priority(Priority::High))
            .await
            .unwrap();

        let tasks = service
            .list(&TaskListOptions {
                search_term: "report".to_string(),
                ..TaskListOptions::default()
            })
            .await
            .unwrap();

        assert_eq!(tasks, vec![created]);
    }

    #[tokio::test]
    async fn update_without_id_is_rejected_before_any_call() {
        let (gateway, service) = service();
        let err = service
            .update(TaskPatch::default().with_completed(true))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(gateway.is_empty(Task::COLLECTION));
    }

    #[tokio::test]
    async fn delete_rejects_invalid_id() {
        let (_, service) = service();
        let err = service.delete(0).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn completed_filter_returns_only_completed() {
        let (_, service) = service();
        service.create(TaskDraft::new("open")).await.unwrap();
        let done = service
            .create(TaskDraft::new("done").with_completed(true))
            .await
            .unwrap();

        let tasks = service
            .list(&TaskListOptions {
                status: StatusFilter::Completed,
                ..TaskListOptions::default()
            })
            .await
            .unwrap();
        assert_eq!(tasks, vec![done]);
    }

    #[tokio::test]
    async fn stats_counts_and_productivity() {
        let (_, service) = service();
        service
            .create(TaskDraft::new("a").with_completed(true))
            .await
            .unwrap();
        service
            .create(TaskDraft::new("b").with_priority(Priority::High))
            .await
            .unwrap();
        service.create(TaskDraft::new("c")).await.unwrap();

        let stats = service.stats().await.unwrap();
        assert_eq!(
            stats,
            TaskStats {
                total_tasks: 3,
                tasks_completed: 1,
                high_priority_count: 1,
                productivity: 33,
            }
        );
    }

    #[tokio::test]
    async fn gateway_failure_message_is_carried() {
        let (gateway, service) = service();
        gateway.reject_next_write(Task::COLLECTION, "record validation failed");

        let err = service.create(TaskDraft::new("x")).await.unwrap_err();
        match err {
            Error::Operation { message, .. } => {
                assert_eq!(message, "record validation failed");
            },
            other => panic!("expected operation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn outage_surfaces_as_network_error() {
        let (gateway, service) = service();
        gateway.set_unavailable(true);

        let err = service.list(&TaskListOptions::default()).await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }
}
