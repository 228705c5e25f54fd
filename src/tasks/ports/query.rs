//! Query vocabulary shared between services and repositories.

use crate::tasks::domain::{StatusFilter, Task, UserId};
use serde::Serialize;

/// Predicate set for task listings.
///
/// The owner predicate is mandatory: a filter can only be built through
/// [`TaskFilter::for_owner`], so every repository search is scoped to one
/// user's lists and the ownership check cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    owner: UserId,
    search: Option<String>,
    status: StatusFilter,
}

impl TaskFilter {
    /// Creates a filter matching every task owned by the given user.
    #[must_use]
    pub const fn for_owner(owner: UserId) -> Self {
        Self {
            owner,
            search: None,
            status: StatusFilter::All,
        }
    }

    /// Restricts matches to tasks whose title or description contains the
    /// term, case-insensitively. Blank terms impose no restriction.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let raw = term.into();
        let trimmed = raw.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        };
        self
    }

    /// Restricts matches by completion status.
    #[must_use]
    pub const fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Returns the owning user every match must belong to.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the search term, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the completion-status restriction.
    #[must_use]
    pub const fn status(&self) -> StatusFilter {
        self.status
    }
}

/// One page of a larger task result set plus position metadata.
///
/// The metadata mirrors what a paginated task index needs to render page
/// controls: 1-indexed current and last page, the page size, the total
/// match count, and the 1-indexed positions of the first and last item on
/// this page (`None` when the page is empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPage {
    /// Tasks on this page, most recently created first.
    pub items: Vec<Task>,
    /// 1-indexed page that was requested.
    pub current_page: u64,
    /// 1-indexed last page holding any items; 1 when the set is empty.
    pub last_page: u64,
    /// Page size used for the query.
    pub per_page: u64,
    /// Total number of tasks matching the filter.
    pub total: u64,
    /// 1-indexed position of the first item on this page.
    pub from: Option<u64>,
    /// 1-indexed position of the last item on this page.
    pub to: Option<u64>,
}
