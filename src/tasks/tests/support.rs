//! Shared fixtures for task unit tests.

use crate::tasks::{
    adapters::memory::InMemoryStore,
    domain::{ListId, Task, TaskList, UserId},
    services::{
        DashboardService, ListService, OwnershipGuard, TaskDraft, TaskMutationService,
        TaskQueryService,
    },
};
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Clock that advances one second per reading, so creation order is
/// deterministic and distinct even within a single test.
pub struct SteppingClock {
    base: DateTime<Utc>,
    step: AtomicI64,
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self {
            base: DateTime::from_timestamp(1_700_000_000, 0).expect("valid base timestamp"),
            step: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let step = self.step.fetch_add(1, Ordering::SeqCst);
        self.base + TimeDelta::seconds(step)
    }
}

/// Fully wired service stack over one in-memory store.
pub struct Harness {
    /// Shared store backing both repositories.
    pub store: Arc<InMemoryStore>,
    /// Ownership guard over the store.
    pub guard: OwnershipGuard<InMemoryStore, InMemoryStore>,
    /// List lifecycle service.
    pub lists: ListService<InMemoryStore, InMemoryStore, SteppingClock>,
    /// Task mutation service.
    pub mutations: TaskMutationService<InMemoryStore, InMemoryStore, SteppingClock>,
    /// Task query service.
    pub queries: TaskQueryService<InMemoryStore>,
    /// Dashboard aggregator.
    pub dashboard: DashboardService<InMemoryStore, InMemoryStore>,
}

impl Harness {
    /// Builds the full stack over a fresh store and stepping clock.
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(SteppingClock::default());
        let guard = OwnershipGuard::new(Arc::clone(&store), Arc::clone(&store));
        Self {
            lists: ListService::new(guard.clone(), Arc::clone(&store), Arc::clone(&clock)),
            mutations: TaskMutationService::new(guard.clone(), Arc::clone(&store), clock),
            queries: TaskQueryService::new(Arc::clone(&store)),
            dashboard: DashboardService::new(Arc::clone(&store), Arc::clone(&store)),
            guard,
            store,
        }
    }

    /// Creates a list for the given user.
    pub async fn seed_list(&self, owner: UserId, title: &str) -> TaskList {
        self.lists
            .create(owner, title)
            .await
            .expect("list creation should succeed")
    }

    /// Creates a task with the given title in the given list.
    pub async fn seed_task(&self, owner: UserId, list_id: ListId, title: &str) -> Task {
        self.mutations
            .create(owner, TaskDraft::new(title, list_id))
            .await
            .expect("task creation should succeed")
    }
}
