//! Validated create/update/delete operations on tasks.

use crate::tasks::{
    domain::{DomainError, ListId, Task, TaskAttributes, TaskId, Title, UserId, parse_due_date},
    ports::{ListRepository, RepositoryError, TaskRepository},
    services::guard::{AccessError, OwnershipGuard},
};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for creating or updating a task.
///
/// Carries raw form-shaped input; the mutation service validates every
/// field and reports all failures together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
    due_date: Option<String>,
    list_id: ListId,
    is_completed: Option<bool>,
}

impl TaskDraft {
    /// Creates a draft with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, list_id: ListId) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            list_id,
            is_completed: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date as submitted (`YYYY-MM-DD`).
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the completion flag. Unset drafts default to not completed.
    #[must_use]
    pub const fn with_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }
}

/// Collected field-level validation failures.
#[derive(Debug, Clone, Default, Error, PartialEq, Eq)]
#[error("validation failed: {}", joined_messages(.errors))]
pub struct ValidationErrors {
    errors: Vec<DomainError>,
}

fn joined_messages(errors: &[DomainError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    fn push(&mut self, error: DomainError) {
        self.errors.push(error);
    }

    fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the individual failures in the order they were detected.
    #[must_use]
    pub fn errors(&self) -> &[DomainError] {
        &self.errors
    }

    /// Groups failure messages by request field, ready for form redisplay.
    #[must_use]
    pub fn by_field(&self) -> BTreeMap<&'static str, Vec<String>> {
        let mut map: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.field()).or_default().push(error.to_string());
        }
        map
    }
}

/// Errors returned by task mutation operations.
#[derive(Debug, Clone, Error)]
pub enum TaskMutationError {
    /// One or more draft fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// No task exists for the identifier.
    #[error("task not found")]
    NotFound,

    /// The task belongs to another user.
    #[error("access denied")]
    Forbidden,

    /// The mutation failed at the persistence layer.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<AccessError> for TaskMutationError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound => Self::NotFound,
            AccessError::Forbidden => Self::Forbidden,
            AccessError::Repository(inner) => Self::Repository(inner),
        }
    }
}

/// Task create/update/delete orchestration.
///
/// Validation and authorization both complete before any repository write,
/// so a failed call leaves no partial state behind.
#[derive(Clone)]
pub struct TaskMutationService<L, T, C>
where
    L: ListRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    guard: OwnershipGuard<L, T>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<L, T, C> TaskMutationService<L, T, C>
where
    L: ListRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a mutation service.
    #[must_use]
    pub const fn new(guard: OwnershipGuard<L, T>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            guard,
            tasks,
            clock,
        }
    }

    /// Creates a task in a list owned by the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Validation`] when any field is invalid,
    /// including a `list_id` that does not resolve to a list owned by the
    /// acting user. No task is created on any failure.
    pub async fn create(&self, actor: UserId, draft: TaskDraft) -> Result<Task, TaskMutationError> {
        let attributes = self.validate(actor, draft).await?;
        let task = Task::new(attributes, &*self.clock);
        self.tasks.store(&task).await?;
        debug!(%actor, task_id = %task.id(), list_id = %task.list_id(), "created task");
        Ok(task)
    }

    /// Replaces every field of an existing task.
    ///
    /// The task is resolved and authorized before the draft is validated:
    /// a missing task is [`TaskMutationError::NotFound`] and a task in
    /// another user's list is [`TaskMutationError::Forbidden`], regardless
    /// of the draft's contents. The new `list_id` must also belong to the
    /// acting user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::NotFound`], [`TaskMutationError::Forbidden`],
    /// or [`TaskMutationError::Validation`]; the stored task is unchanged on
    /// every failure path.
    pub async fn update(
        &self,
        actor: UserId,
        task_id: TaskId,
        draft: TaskDraft,
    ) -> Result<Task, TaskMutationError> {
        let mut task = self.guard.authorize_task(actor, task_id).await?;
        let attributes = self.validate(actor, draft).await?;
        task.apply_edit(attributes, &*self.clock);
        self.tasks.update(&task).await?;
        debug!(%actor, %task_id, "updated task");
        Ok(task)
    }

    /// Permanently removes a task owned by the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::NotFound`] when no task exists for the
    /// identifier — including a repeat delete of the same id — and
    /// [`TaskMutationError::Forbidden`] when the task belongs to another
    /// user.
    pub async fn delete(&self, actor: UserId, task_id: TaskId) -> Result<(), TaskMutationError> {
        self.guard.authorize_task(actor, task_id).await?;
        self.tasks.delete(task_id).await.map_err(|err| match err {
            RepositoryError::TaskNotFound(_) => TaskMutationError::NotFound,
            other => TaskMutationError::Repository(other),
        })?;
        debug!(%actor, %task_id, "deleted task");
        Ok(())
    }

    /// Validates a draft into applicable attributes, collecting every field
    /// failure. The `list_id` check consults the ownership guard; unknown
    /// and unowned lists produce the same `list_id` field error.
    async fn validate(
        &self,
        actor: UserId,
        draft: TaskDraft,
    ) -> Result<TaskAttributes, TaskMutationError> {
        let mut errors = ValidationErrors::default();

        let title = match Title::new(draft.title) {
            Ok(title) => Some(title),
            Err(err) => {
                errors.push(err);
                None
            }
        };
        let due_date = match parse_due_date(draft.due_date.as_deref()) {
            Ok(due_date) => due_date,
            Err(err) => {
                errors.push(err);
                None
            }
        };
        match self.guard.authorize_list(actor, draft.list_id).await {
            Ok(_) => {}
            Err(AccessError::NotFound | AccessError::Forbidden) => {
                errors.push(DomainError::InvalidList);
            }
            Err(AccessError::Repository(err)) => return Err(err.into()),
        }

        match (title, errors.is_empty()) {
            (Some(title), true) => Ok(TaskAttributes {
                title,
                description: draft.description,
                due_date,
                list_id: draft.list_id,
                is_completed: draft.is_completed.unwrap_or(false),
            }),
            _ => Err(errors.into()),
        }
    }
}
