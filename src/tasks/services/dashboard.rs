//! Per-user dashboard counts.

use crate::tasks::{
    domain::UserId,
    ports::{ListRepository, RepositoryError, TaskRepository},
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Aggregate counts for one user's dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Lists owned by the user.
    pub total_lists: u64,
    /// Tasks reachable through the user's lists.
    pub total_tasks: u64,
    /// Tasks with the completion flag set.
    pub completed_tasks: u64,
    /// Tasks with the completion flag clear.
    pub pending_tasks: u64,
}

/// Errors returned by the dashboard aggregator.
#[derive(Debug, Clone, Error)]
pub enum DashboardError {
    /// Counting failed at the persistence layer.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Computes dashboard counts scoped to the acting user.
#[derive(Clone)]
pub struct DashboardService<L, T>
where
    L: ListRepository,
    T: TaskRepository,
{
    lists: Arc<L>,
    tasks: Arc<T>,
}

impl<L, T> DashboardService<L, T>
where
    L: ListRepository,
    T: TaskRepository,
{
    /// Creates a dashboard service.
    #[must_use]
    pub const fn new(lists: Arc<L>, tasks: Arc<T>) -> Self {
        Self { lists, tasks }
    }

    /// Returns list and task counts for the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Repository`] when the underlying store
    /// fails.
    pub async fn stats(&self, actor: UserId) -> Result<DashboardStats, DashboardError> {
        let total_lists = self.lists.count_for_owner(actor).await?;
        let counts = self.tasks.status_counts(actor).await?;
        Ok(DashboardStats {
            total_lists,
            total_tasks: counts.total,
            completed_tasks: counts.completed,
            pending_tasks: counts.pending(),
        })
    }
}
