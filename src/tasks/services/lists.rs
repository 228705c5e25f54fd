//! List creation, deletion, and enumeration.

use crate::tasks::{
    domain::{DomainError, ListId, TaskList, Title, UserId},
    ports::{ListRepository, RepositoryError, TaskRepository},
    services::guard::{AccessError, OwnershipGuard},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned by list operations.
#[derive(Debug, Clone, Error)]
pub enum ListServiceError {
    /// The list title failed validation.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// No list exists for the identifier.
    #[error("list not found")]
    NotFound,

    /// The list belongs to another user.
    #[error("access denied")]
    Forbidden,

    /// The operation failed at the persistence layer.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<AccessError> for ListServiceError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound => Self::NotFound,
            AccessError::Forbidden => Self::Forbidden,
            AccessError::Repository(inner) => Self::Repository(inner),
        }
    }
}

/// List lifecycle orchestration.
#[derive(Clone)]
pub struct ListService<L, T, C>
where
    L: ListRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    guard: OwnershipGuard<L, T>,
    lists: Arc<L>,
    clock: Arc<C>,
}

impl<L, T, C> ListService<L, T, C>
where
    L: ListRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a list service.
    #[must_use]
    pub const fn new(guard: OwnershipGuard<L, T>, lists: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            guard,
            lists,
            clock,
        }
    }

    /// Creates a list owned by the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`ListServiceError::Validation`] when the title is empty or
    /// too long.
    pub async fn create(
        &self,
        actor: UserId,
        title: impl Into<String> + Send,
    ) -> Result<TaskList, ListServiceError> {
        let title = Title::new(title)?;
        let list = TaskList::new(title, actor, &*self.clock);
        self.lists.store(&list).await?;
        debug!(%actor, list_id = %list.id(), "created list");
        Ok(list)
    }

    /// Deletes a list owned by the acting user, along with every task it
    /// contains.
    ///
    /// # Errors
    ///
    /// Returns [`ListServiceError::NotFound`] when no list exists for the
    /// identifier and [`ListServiceError::Forbidden`] when it belongs to
    /// another user.
    pub async fn delete(&self, actor: UserId, list_id: ListId) -> Result<(), ListServiceError> {
        self.guard.authorize_list(actor, list_id).await?;
        self.lists.delete(list_id).await.map_err(|err| match err {
            RepositoryError::ListNotFound(_) => ListServiceError::NotFound,
            other => ListServiceError::Repository(other),
        })?;
        debug!(%actor, %list_id, "deleted list");
        Ok(())
    }

    /// Returns the acting user's lists, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`ListServiceError::Repository`] when the underlying store
    /// fails.
    pub async fn lists_for(&self, actor: UserId) -> Result<Vec<TaskList>, ListServiceError> {
        Ok(self.lists.list_for_owner(actor).await?)
    }
}
