//! Paginated, filtered task listings.

use crate::tasks::{
    domain::{StatusFilter, UserId},
    ports::{RepositoryError, TaskFilter, TaskPage, TaskRepository},
};
use std::sync::Arc;
use thiserror::Error;

/// Page size used when neither the service nor the request overrides it.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Listing request: optional search term, status filter, and page position.
///
/// Built with defaults (`page` 1, status [`StatusFilter::All`], no search)
/// and refined through the `with_*` methods, matching how query-string
/// parameters arrive from a task index page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListing {
    search: Option<String>,
    status: StatusFilter,
    page: Option<u64>,
    per_page: Option<u64>,
}

impl TaskListing {
    /// Creates a request for the first page of all tasks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search term.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Sets the completion-status filter.
    #[must_use]
    pub const fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Sets the 1-indexed page to return. Zero is treated as page one.
    #[must_use]
    pub const fn with_page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Overrides the page size for this request. Zero is treated as one.
    #[must_use]
    pub const fn with_per_page(mut self, per_page: u64) -> Self {
        self.per_page = Some(per_page);
        self
    }
}

/// Errors returned by the query service.
#[derive(Debug, Clone, Error)]
pub enum TaskQueryError {
    /// Lookup failed at the persistence layer.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Read-only task listing service.
///
/// Every query is scoped to the acting user's lists through
/// [`TaskFilter::for_owner`]; there is no unscoped entry point.
#[derive(Clone)]
pub struct TaskQueryService<T>
where
    T: TaskRepository,
{
    tasks: Arc<T>,
    default_page_size: u64,
}

impl<T> TaskQueryService<T>
where
    T: TaskRepository,
{
    /// Creates a query service with the default page size.
    #[must_use]
    pub const fn new(tasks: Arc<T>) -> Self {
        Self {
            tasks,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Replaces the page size used when requests do not override it.
    /// Zero is treated as one.
    #[must_use]
    pub fn with_default_page_size(mut self, per_page: u64) -> Self {
        self.default_page_size = per_page.max(1);
        self
    }

    /// Returns one page of the acting user's tasks.
    ///
    /// Tasks are ordered by creation time descending with ties broken by id
    /// descending. Requesting a page past the end yields an empty item set
    /// with correct metadata (`from` and `to` are `None`).
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::Repository`] when the underlying store
    /// fails.
    pub async fn list(
        &self,
        actor: UserId,
        listing: &TaskListing,
    ) -> Result<TaskPage, TaskQueryError> {
        let per_page = listing
            .per_page
            .unwrap_or(self.default_page_size)
            .max(1);
        let current_page = listing.page.unwrap_or(1).max(1);
        let offset = current_page.saturating_sub(1).saturating_mul(per_page);

        let mut filter = TaskFilter::for_owner(actor).with_status(listing.status);
        if let Some(term) = &listing.search {
            filter = filter.with_search(term.clone());
        }

        let total = self.tasks.count(&filter).await?;
        let items = self.tasks.search(&filter, per_page, offset).await?;

        let returned = u64::try_from(items.len()).unwrap_or(u64::MAX);
        let (from, to) = if returned == 0 {
            (None, None)
        } else {
            (Some(offset + 1), Some(offset + returned))
        };

        Ok(TaskPage {
            items,
            current_page,
            last_page: total.div_ceil(per_page).max(1),
            per_page,
            total,
            from,
            to,
        })
    }
}
