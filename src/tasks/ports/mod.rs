//! Port contracts for task-management services.
//!
//! Ports define infrastructure-agnostic interfaces used by the services.

pub mod query;
pub mod repository;

pub use query::{TaskFilter, TaskPage};
pub use repository::{
    ListRepository, RepositoryError, RepositoryResult, TaskRepository, TaskStatusCounts,
};
