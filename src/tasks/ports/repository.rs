//! Repository ports for list and task persistence.

use crate::tasks::domain::{ListId, Task, TaskId, TaskList, UserId};
use crate::tasks::ports::query::TaskFilter;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Per-user task counts backing the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStatusCounts {
    /// All tasks reachable through the user's lists.
    pub total: u64,
    /// Tasks with the completion flag set.
    pub completed: u64,
}

impl TaskStatusCounts {
    /// Returns the number of tasks not yet completed.
    #[must_use]
    pub const fn pending(self) -> u64 {
        self.total.saturating_sub(self.completed)
    }
}

/// List persistence contract.
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Stores a new list.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateList`] when the identifier
    /// already exists.
    async fn store(&self, list: &TaskList) -> RepositoryResult<()>;

    /// Finds a list by identifier.
    ///
    /// Returns `None` when the list does not exist.
    async fn find_by_id(&self, id: ListId) -> RepositoryResult<Option<TaskList>>;

    /// Returns the given user's lists, most recently created first.
    async fn list_for_owner(&self, owner: UserId) -> RepositoryResult<Vec<TaskList>>;

    /// Deletes a list and every task it contains.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ListNotFound`] when the list does not
    /// exist.
    async fn delete(&self, id: ListId) -> RepositoryResult<()>;

    /// Counts the given user's lists.
    async fn count_for_owner(&self, owner: UserId) -> RepositoryResult<u64>;
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateTask`] when the identifier
    /// already exists.
    async fn store(&self, task: &Task) -> RepositoryResult<()>;

    /// Persists changes to an existing task, replacing every stored field.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> RepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>>;

    /// Permanently removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::TaskNotFound`] when no row exists for the
    /// identifier, which makes repeated deletes observable but harmless.
    async fn delete(&self, id: TaskId) -> RepositoryResult<()>;

    /// Returns one page of tasks matching the filter, ordered by creation
    /// time descending with ties broken by id descending.
    async fn search(&self, filter: &TaskFilter, limit: u64, offset: u64)
    -> RepositoryResult<Vec<Task>>;

    /// Counts all tasks matching the filter.
    async fn count(&self, filter: &TaskFilter) -> RepositoryResult<u64>;

    /// Returns total and completed task counts for the given user.
    async fn status_counts(&self, owner: UserId) -> RepositoryResult<TaskStatusCounts>;
}

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// A list with the same identifier already exists.
    #[error("duplicate list identifier: {0}")]
    DuplicateList(ListId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The list was not found.
    #[error("list not found: {0}")]
    ListNotFound(ListId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
