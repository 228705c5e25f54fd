//! Task list aggregate.

use super::{ListId, Title, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// User-owned named grouping of tasks.
///
/// The owner is fixed at creation; every task access is authorized by
/// following the task's `list_id` to this aggregate and comparing owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    id: ListId,
    title: Title,
    owner: UserId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedListData {
    /// Persisted list identifier.
    pub id: ListId,
    /// Persisted title.
    pub title: Title,
    /// Persisted owner identifier.
    pub owner: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TaskList {
    /// Creates a new list owned by the given user.
    #[must_use]
    pub fn new(title: Title, owner: UserId, clock: &impl Clock) -> Self {
        Self {
            id: ListId::new(),
            title,
            owner,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a list from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedListData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            owner: data.owner,
            created_at: data.created_at,
        }
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> ListId {
        self.id
    }

    /// Returns the list title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reports whether the given user owns this list.
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }
}
