//! Service-level behavior over the in-memory gateway.

use std::sync::Arc;

use flowmastery::gateway::types::{QueryParams, WhereClause};
use flowmastery::gateway::{InMemoryGateway, RecordGateway};
use flowmastery::services::{
    TaskListOptions, TaskService, WorkflowListOptions, WorkflowService,
};
use flowmastery::types::{Priority, StatusFilter, TaskDraft, TaskPatch, WorkflowDraft};
use flowmastery::{Error, RecordSchema, Task, Workflow};
use pretty_assertions::assert_eq;
use serde_json::json;

fn task_service() -> (Arc<InMemoryGateway>, TaskService) {
    let gateway = Arc::new(InMemoryGateway::new());
    let service = TaskService::new(gateway.clone());
    (gateway, service)
}

#[tokio::test]
async fn create_update_delete_round_trip() {
    let (_, service) = task_service();

    let created = service
        .create(TaskDraft::new("Draft the announcement").with_priority(Priority::High))
        .await
        .unwrap();
    assert_eq!(created.title, "Draft the announcement");
    assert_eq!(created.priority, Priority::High);
    assert!(!created.completed);

    let updated = service
        .update(TaskPatch::new(created.id).with_completed(true))
        .await
        .unwrap();
    assert!(updated.completed);
    assert_eq!(updated.title, created.title, "unpatched fields persist");

    assert!(service.delete(created.id).await.unwrap());
    let remaining = service.list(&TaskListOptions::default()).await.unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn list_filters_combine_with_and() {
    let (_, service) = task_service();
    service
        .create(TaskDraft::new("Review budget").with_priority(Priority::High))
        .await
        .unwrap();
    service
        .create(
            TaskDraft::new("Review roadmap")
                .with_priority(Priority::High)
                .with_completed(true),
        )
        .await
        .unwrap();
    service
        .create(TaskDraft::new("Send budget recap"))
        .await
        .unwrap();

    let tasks = service
        .list(&TaskListOptions {
            search_term: "review".to_string(),
            status: StatusFilter::Active,
            priority: Some(Priority::High),
        })
        .await
        .unwrap();

    let titles: Vec<&str> = tasks.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, vec!["Review budget"]);
}

#[tokio::test]
async fn writes_never_carry_system_fields() {
    // Drafts and patches only expose client-writable fields, so the stored
    // audit columns must come from the gateway, not the payload.
    let (gateway, service) = task_service();
    let created = service.create(TaskDraft::new("Audit check")).await.unwrap();

    let response = gateway
        .fetch_records(
            Task::COLLECTION,
            QueryParams {
                fields: vec![
                    "Id".to_string(),
                    "CreatedOn".to_string(),
                    "CreatedBy".to_string(),
                    "ModifiedOn".to_string(),
                ],
                filters: vec![WhereClause::exact_match("Id", json!(created.id))],
                ..QueryParams::default()
            },
        )
        .await
        .unwrap();

    let record = &response.data[0];
    assert!(record.get("CreatedOn").is_some_and(|v| v.is_string()));
    assert_eq!(record.get("CreatedBy"), Some(&json!("local")));
}

#[tokio::test]
async fn update_without_id_never_reaches_the_gateway() {
    let (gateway, service) = task_service();
    let err = service
        .update(TaskPatch::default().with_title("renamed"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(gateway.is_empty(Task::COLLECTION));
}

#[tokio::test]
async fn update_of_missing_record_carries_gateway_message() {
    let (_, service) = task_service();
    let err = service
        .update(TaskPatch::new(999).with_completed(true))
        .await
        .unwrap_err();

    match err {
        Error::Operation { collection, message } => {
            assert_eq!(collection, Task::COLLECTION);
            assert!(message.contains("999"));
        },
        other => panic!("expected operation error, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_of_missing_record_reports_failure() {
    let (_, service) = task_service();
    assert!(!service.delete(42).await.unwrap());
}

#[tokio::test]
async fn outage_maps_to_network_error_everywhere() {
    let (gateway, service) = task_service();
    gateway.set_unavailable(true);

    assert!(matches!(
        service.list(&TaskListOptions::default()).await.unwrap_err(),
        Error::Network(_)
    ));
    assert!(matches!(
        service.stats().await.unwrap_err(),
        Error::Network(_)
    ));
    assert!(matches!(
        service.create(TaskDraft::new("x")).await.unwrap_err(),
        Error::Network(_)
    ));
    assert!(matches!(
        service.delete(1).await.unwrap_err(),
        Error::Network(_)
    ));
}

#[tokio::test]
async fn workflows_share_the_gateway_without_collisions() {
    let gateway = Arc::new(InMemoryGateway::new());
    let tasks = TaskService::new(gateway.clone());
    let workflows = WorkflowService::new(gateway.clone());

    tasks.create(TaskDraft::new("Prepare review")).await.unwrap();
    workflows
        .create(WorkflowDraft::new("Review pipeline"))
        .await
        .unwrap();
    workflows
        .create(WorkflowDraft::new("Retired pipeline").with_active(false))
        .await
        .unwrap();

    assert_eq!(gateway.len(Task::COLLECTION), 1);
    assert_eq!(gateway.len(Workflow::COLLECTION), 2);
    assert_eq!(workflows.active_count().await.unwrap(), 1);

    let listed = workflows
        .list(&WorkflowListOptions {
            search_term: "pipeline".to_string(),
            active_only: true,
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Review pipeline");
}
