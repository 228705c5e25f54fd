//! Task aggregate.

use super::{ListId, TaskId, Title};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated field set applied on task creation and update.
///
/// Updates replace every field at once, so the same parameter object serves
/// both paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAttributes {
    /// Task title.
    pub title: Title,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional due date (calendar date, no time component).
    pub due_date: Option<NaiveDate>,
    /// Parent list; must be owned by the acting user.
    pub list_id: ListId,
    /// Completion flag.
    pub is_completed: bool,
}

/// Unit of work belonging to exactly one list.
///
/// Tasks carry no owner field; ownership is resolved transitively through
/// the parent list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: Title,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    list_id: ListId,
    is_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: Title,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted parent list identifier.
    pub list_id: ListId,
    /// Persisted completion flag.
    pub is_completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from validated attributes.
    #[must_use]
    pub fn new(attributes: TaskAttributes, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: attributes.title,
            description: attributes.description,
            due_date: attributes.due_date,
            list_id: attributes.list_id,
            is_completed: attributes.is_completed,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            list_id: data.list_id,
            is_completed: data.is_completed,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the parent list identifier.
    #[must_use]
    pub const fn list_id(&self) -> ListId {
        self.list_id
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces every editable field and touches `updated_at`.
    ///
    /// The identifier and `created_at` are preserved.
    pub fn apply_edit(&mut self, attributes: TaskAttributes, clock: &impl Clock) {
        self.title = attributes.title;
        self.description = attributes.description;
        self.due_date = attributes.due_date;
        self.list_id = attributes.list_id;
        self.is_completed = attributes.is_completed;
        self.updated_at = clock.utc();
    }
}
