//! Centralized ownership authorization.
//!
//! Every read and write path resolves the acting user's right to a resource
//! through this guard instead of repeating inline checks, so the ownership
//! rule cannot drift between operations.

use crate::tasks::{
    domain::{ListId, Task, TaskId, TaskList, UserId},
    ports::{ListRepository, RepositoryError, TaskRepository},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Authorization failures.
///
/// `NotFound` and `Forbidden` stay distinct so callers can log accurately,
/// but neither carries resource detail in its message; a presentation layer
/// collapses both into one opaque denial to avoid leaking whether the
/// resource exists under another owner.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    /// No resource exists for the identifier.
    #[error("resource not found")]
    NotFound,

    /// The resource exists but belongs to another user.
    #[error("access denied")]
    Forbidden,

    /// Lookup failed at the persistence layer.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Decides whether an acting user may access a list or task.
///
/// Task ownership is transitive: the guard resolves the task, follows its
/// `list_id`, and compares the list's owner against the acting user.
#[derive(Clone)]
pub struct OwnershipGuard<L, T>
where
    L: ListRepository,
    T: TaskRepository,
{
    lists: Arc<L>,
    tasks: Arc<T>,
}

impl<L, T> OwnershipGuard<L, T>
where
    L: ListRepository,
    T: TaskRepository,
{
    /// Creates a guard over the given repositories.
    #[must_use]
    pub const fn new(lists: Arc<L>, tasks: Arc<T>) -> Self {
        Self { lists, tasks }
    }

    /// Resolves a list and checks the acting user owns it.
    ///
    /// Returns the resolved aggregate so callers need not fetch it again.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotFound`] when no list exists for the
    /// identifier and [`AccessError::Forbidden`] when it belongs to another
    /// user.
    pub async fn authorize_list(
        &self,
        actor: UserId,
        list_id: ListId,
    ) -> Result<TaskList, AccessError> {
        let Some(list) = self.lists.find_by_id(list_id).await? else {
            warn!(%actor, %list_id, "authorization failed: list does not exist");
            return Err(AccessError::NotFound);
        };
        if !list.is_owned_by(actor) {
            warn!(%actor, %list_id, owner = %list.owner(), "denied access to another user's list");
            return Err(AccessError::Forbidden);
        }
        Ok(list)
    }

    /// Resolves a task and checks the acting user owns its parent list.
    ///
    /// Returns the resolved aggregate so callers need not fetch it again.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotFound`] when no task exists for the
    /// identifier and [`AccessError::Forbidden`] when its parent list
    /// belongs to another user.
    pub async fn authorize_task(&self, actor: UserId, task_id: TaskId) -> Result<Task, AccessError> {
        let Some(task) = self.tasks.find_by_id(task_id).await? else {
            warn!(%actor, %task_id, "authorization failed: task does not exist");
            return Err(AccessError::NotFound);
        };
        let Some(list) = self.lists.find_by_id(task.list_id()).await? else {
            // A dangling list reference should be impossible under the
            // cascade policy; treat it as absent rather than owned.
            warn!(%actor, %task_id, list_id = %task.list_id(), "task references a missing list");
            return Err(AccessError::NotFound);
        };
        if !list.is_owned_by(actor) {
            warn!(%actor, %task_id, owner = %list.owner(), "denied access to another user's task");
            return Err(AccessError::Forbidden);
        }
        Ok(task)
    }
}
