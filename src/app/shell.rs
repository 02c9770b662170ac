//! Headless application shell.
//!
//! [`AppShell`] holds the state a rendering host needs: the session handle,
//! the entity services, the loaded task list, and the local search and
//! status filters. Every user intent is a method that calls a service,
//! reconciles the local list, and surfaces the outcome as a one-line notice
//! through the [`Notifier`] seam. Failures never escape an intent method.

use std::sync::Arc;

use tracing::{debug, error};

use crate::app::notify::Notifier;
use crate::app::router::Route;
use crate::gateway::RecordGateway;
use crate::services::{TaskListOptions, TaskService, WorkflowService};
use crate::session::SessionHandle;
use crate::types::{Priority, RecordId, StatusFilter, Task, TaskDraft, TaskPatch, TaskStats};

/// What the host should render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// The bootstrap has not reached its terminal state; render a busy
    /// indicator and nothing else.
    Busy,
    /// Render the given route.
    Route(Route),
}

/// Aggregate numbers for the dashboard stat cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    /// Task counts and productivity percentage.
    pub tasks: TaskStats,
    /// Number of active workflows.
    pub active_workflows: usize,
}

/// The dashboard's state and intents, decoupled from any rendering host.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use flowmastery::app::notify::BufferedNotifier;
/// use flowmastery::app::shell::AppShell;
/// use flowmastery::gateway::InMemoryGateway;
/// use flowmastery::session::SessionHandle;
/// use flowmastery::types::Priority;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let session = SessionHandle::new();
/// session.mark_initialized();
/// let notifier = Arc::new(BufferedNotifier::new());
/// let mut shell = AppShell::new(
///     session,
///     Arc::new(InMemoryGateway::new()),
///     notifier.clone(),
/// );
///
/// assert!(shell.add_task("Ship release", Priority::High).await);
/// assert_eq!(shell.visible_tasks().len(), 1);
/// # });
/// ```
pub struct AppShell {
    session: SessionHandle,
    tasks: TaskService,
    workflows: WorkflowService,
    notifier: Arc<dyn Notifier>,
    task_list: Vec<Task>,
    search_term: String,
    status_filter: StatusFilter,
}

impl AppShell {
    /// Creates a shell over the given gateway.
    pub fn new(
        session: SessionHandle,
        gateway: Arc<dyn RecordGateway>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session,
            tasks: TaskService::new(gateway.clone()),
            workflows: WorkflowService::new(gateway),
            notifier,
            task_list: Vec::new(),
            search_term: String::new(),
            status_filter: StatusFilter::All,
        }
    }

    /// What to render for `location`: a busy indicator until the session is
    /// initialized, the matched route afterwards.
    pub fn render_state(&self, location: &str) -> RenderState {
        if !self.session.is_initialized() {
            return RenderState::Busy;
        }
        RenderState::Route(Route::match_location(location))
    }

    /// Loads the dashboard stat cards: task statistics plus the active
    /// workflow count.
    ///
    /// Returns `None` without a remote call while the session is still
    /// bootstrapping, and `None` with an error notice when either fetch
    /// fails.
    pub async fn refresh_dashboard(&self) -> Option<DashboardStats> {
        if !self.session.is_initialized() {
            return None;
        }

        let stats = match self.tasks.stats().await {
            Ok(stats) => stats,
            Err(err) => {
                error!(error = %err, "dashboard stats fetch failed");
                self.notifier.error("Failed to load dashboard data");
                return None;
            },
        };
        let active_workflows = match self.workflows.active_count().await {
            Ok(count) => count,
            Err(err) => {
                error!(error = %err, "workflow count fetch failed");
                self.notifier.error("Failed to load dashboard data");
                return None;
            },
        };

        self.notifier.success("Dashboard updated successfully");
        Some(DashboardStats {
            tasks: stats,
            active_workflows,
        })
    }

    /// Reloads the full task list.
    ///
    /// Search and status filtering happen locally over the loaded list, so
    /// the fetch is unfiltered. No-op while the session is bootstrapping.
    pub async fn load_tasks(&mut self) {
        if !self.session.is_initialized() {
            return;
        }

        match self.tasks.list(&TaskListOptions::default()).await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "task list loaded");
                self.task_list = tasks;
            },
            Err(err) => {
                error!(error = %err, "task list fetch failed");
                self.notifier.error("Failed to load tasks");
            },
        }
    }

    /// Creates a task and prepends it to the local list.
    ///
    /// Returns `true` when the task was created, so the host knows whether
    /// to reset its input field.
    pub async fn add_task(&mut self, title: &str, priority: Priority) -> bool {
        let title = title.trim();
        if title.is_empty() {
            self.notifier.error("Task cannot be empty");
            return false;
        }
        if !self.session.is_initialized() {
            return false;
        }

        match self
            .tasks
            .create(TaskDraft::new(title).with_priority(priority))
            .await
        {
            Ok(task) => {
                self.task_list.insert(0, task);
                self.notifier.success("Task added successfully");
                true
            },
            Err(err) => {
                error!(error = %err, "task create failed");
                self.notifier.error("Failed to add task");
                false
            },
        }
    }

    /// Flips the completion flag of the task with the given id.
    pub async fn toggle_complete(&mut self, id: RecordId) {
        let Some(task) = self.task_list.iter().find(|task| task.id == id) else {
            return;
        };
        let completed = !task.completed;

        match self
            .tasks
            .update(TaskPatch::new(id).with_completed(completed))
            .await
        {
            Ok(updated) => {
                self.replace(updated);
                if completed {
                    self.notifier.success("Task completed!");
                } else {
                    self.notifier.info("Task marked as incomplete");
                }
            },
            Err(err) => {
                error!(error = %err, "task update failed");
                self.notifier.error("Failed to update task");
            },
        }
    }

    /// Renames the task with the given id.
    ///
    /// Returns `true` when the edit was saved, so the host knows whether to
    /// leave edit mode.
    pub async fn save_edit(&mut self, id: RecordId, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            self.notifier.error("Task title cannot be empty");
            return false;
        }

        match self.tasks.update(TaskPatch::new(id).with_title(title)).await {
            Ok(updated) => {
                self.replace(updated);
                self.notifier.success("Task updated successfully");
                true
            },
            Err(err) => {
                error!(error = %err, "task update failed");
                self.notifier.error("Failed to update task");
                false
            },
        }
    }

    /// Deletes the task with the given id and drops it from the local list.
    pub async fn remove_task(&mut self, id: RecordId) {
        match self.tasks.delete(id).await {
            Ok(true) => {
                self.task_list.retain(|task| task.id != id);
                self.notifier.info("Task removed");
            },
            Ok(false) => {
                self.notifier.error("Failed to delete task");
            },
            Err(err) => {
                error!(error = %err, "task delete failed");
                self.notifier.error("Failed to delete task");
            },
        }
    }

    /// Sets the local search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Sets the local completion filter.
    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    /// The loaded tasks that pass both the search term and the status
    /// filter, in load order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.task_list
            .iter()
            .filter(|task| {
                task.matches_search(&self.search_term) && self.status_filter.accepts(task.completed)
            })
            .collect()
    }

    fn replace(&mut self, updated: Task) {
        if let Some(slot) = self.task_list.iter_mut().find(|task| task.id == updated.id) {
            *slot = updated;
        }
    }
}

impl std::fmt::Debug for AppShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppShell")
            .field("task_count", &self.task_list.len())
            .field("search_term", &self.search_term)
            .field("status_filter", &self.status_filter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::notify::{BufferedNotifier, NoticeLevel};
    use crate::gateway::InMemoryGateway;
    use pretty_assertions::assert_eq;

    fn shell() -> (Arc<InMemoryGateway>, Arc<BufferedNotifier>, AppShell) {
        let gateway = Arc::new(InMemoryGateway::new());
        let notifier = Arc::new(BufferedNotifier::new());
        let session = SessionHandle::new();
        session.mark_initialized();
        let shell = AppShell::new(session, gateway.clone(), notifier.clone());
        (gateway, notifier, shell)
    }

    #[tokio::test]
    async fn busy_until_initialized() {
        let gateway = Arc::new(InMemoryGateway::new());
        let notifier = Arc::new(BufferedNotifier::new());
        let session = SessionHandle::new();
        let shell = AppShell::new(session.clone(), gateway, notifier);

        assert_eq!(shell.render_state("/"), RenderState::Busy);
        session.mark_initialized();
        assert_eq!(shell.render_state("/"), RenderState::Route(Route::Home));
    }

    #[tokio::test]
    async fn dashboard_refresh_waits_for_bootstrap() {
        let gateway = Arc::new(InMemoryGateway::new());
        let notifier = Arc::new(BufferedNotifier::new());
        let shell = AppShell::new(SessionHandle::new(), gateway.clone(), notifier.clone());

        assert_eq!(shell.refresh_dashboard().await, None);
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn dashboard_refresh_aggregates_and_toasts() {
        let (_, notifier, mut shell) = shell();
        shell.add_task("a", Priority::High).await;
        shell.add_task("b", Priority::Medium).await;
        notifier.drain();

        let stats = shell.refresh_dashboard().await.unwrap();
        assert_eq!(stats.tasks.total_tasks, 2);
        assert_eq!(stats.tasks.high_priority_count, 1);
        assert_eq!(stats.active_workflows, 0);

        let notices = notifier.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Dashboard updated successfully");
    }

    #[tokio::test]
    async fn empty_title_is_rejected_locally() {
        let (gateway, notifier, mut shell) = shell();

        assert!(!shell.add_task("   ", Priority::Low).await);
        assert!(gateway.is_empty("task2"));
        let notices = notifier.drain();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].message, "Task cannot be empty");
    }

    #[tokio::test]
    async fn toggle_reports_direction() {
        let (_, notifier, mut shell) = shell();
        shell.add_task("Review", Priority::Medium).await;
        let id = shell.visible_tasks()[0].id;
        notifier.drain();

        shell.toggle_complete(id).await;
        assert_eq!(notifier.drain()[0].message, "Task completed!");
        assert!(shell.visible_tasks()[0].completed);

        shell.toggle_complete(id).await;
        let notices = notifier.drain();
        assert_eq!(notices[0].level, NoticeLevel::Info);
        assert_eq!(notices[0].message, "Task marked as incomplete");
    }

    #[tokio::test]
    async fn remove_drops_from_local_list() {
        let (_, notifier, mut shell) = shell();
        shell.add_task("Ship", Priority::Medium).await;
        let id = shell.visible_tasks()[0].id;
        notifier.drain();

        shell.remove_task(id).await;
        assert!(shell.visible_tasks().is_empty());
        assert_eq!(notifier.drain()[0].message, "Task removed");
    }

    #[tokio::test]
    async fn search_and_status_intersect() {
        let (_, _, mut shell) = shell();
        shell.add_task("Write report", Priority::Medium).await;
        shell.add_task("Review report", Priority::Medium).await;
        shell.add_task("Ship build", Priority::Medium).await;

        let review_id = shell
            .visible_tasks()
            .iter()
            .find(|task| task.title == "Review report")
            .map(|task| task.id)
            .unwrap();
        shell.toggle_complete(review_id).await;

        shell.set_search_term("report");
        shell.set_status_filter(StatusFilter::Active);
        let visible: Vec<&str> = shell
            .visible_tasks()
            .iter()
            .map(|task| task.title.as_str())
            .collect();
        assert_eq!(visible, vec!["Write report"]);
    }

    #[tokio::test]
    async fn failures_surface_as_notices() {
        let (gateway, notifier, mut shell) = shell();
        gateway.set_unavailable(true);

        shell.load_tasks().await;
        assert_eq!(notifier.drain()[0].message, "Failed to load tasks");

        assert!(!shell.add_task("x", Priority::Low).await);
        assert_eq!(notifier.drain()[0].message, "Failed to add task");

        assert_eq!(shell.refresh_dashboard().await, None);
        assert_eq!(
            notifier.drain()[0].message,
            "Failed to load dashboard data"
        );
    }
}
