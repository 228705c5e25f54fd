//! Domain types for user-scoped task management.
//!
//! Pure business types with no infrastructure dependencies: identifier
//! newtypes, validated scalars, and the [`TaskList`] and [`Task`]
//! aggregates. Ownership is modelled transitively: a task belongs to a
//! list, a list belongs to a user, and no task stores its owner directly.

mod error;
mod fields;
mod ids;
mod list;
mod task;

pub use error::{DomainError, MAX_TITLE_LENGTH, ParseStatusFilterError};
pub use fields::{StatusFilter, Title, parse_due_date};
pub use ids::{ListId, TaskId, UserId};
pub use list::{PersistedListData, TaskList};
pub use task::{PersistedTaskData, Task, TaskAttributes};
