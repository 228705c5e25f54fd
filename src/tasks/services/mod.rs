//! Application services for user-scoped task management.

mod dashboard;
mod guard;
mod lists;
mod mutation;
mod query;

pub use dashboard::{DashboardError, DashboardService, DashboardStats};
pub use guard::{AccessError, OwnershipGuard};
pub use lists::{ListService, ListServiceError};
pub use mutation::{TaskDraft, TaskMutationError, TaskMutationService, ValidationErrors};
pub use query::{DEFAULT_PAGE_SIZE, TaskListing, TaskQueryError, TaskQueryService};
