//! Shared stack construction for in-memory integration tests.

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use taskdeck::tasks::{
    adapters::memory::InMemoryStore,
    domain::{ListId, Task, TaskList, UserId},
    services::{
        DashboardService, ListService, OwnershipGuard, TaskDraft, TaskMutationService,
        TaskQueryService,
    },
};

/// Clock advancing one second per reading so creation order is stable.
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

/// Service stack wired over a single shared in-memory store.
pub struct Stack {
    /// List lifecycle service.
    pub lists: ListService<InMemoryStore, InMemoryStore, SteppingClock>,
    /// Task mutation service.
    pub mutations: TaskMutationService<InMemoryStore, InMemoryStore, SteppingClock>,
    /// Task query service.
    pub queries: TaskQueryService<InMemoryStore>,
    /// Dashboard aggregator.
    pub dashboard: DashboardService<InMemoryStore, InMemoryStore>,
}

impl Stack {
    /// Builds a fresh stack.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(SteppingClock::default());
        let guard = OwnershipGuard::new(Arc::clone(&store), Arc::clone(&store));
        Self {
            lists: ListService::new(guard.clone(), Arc::clone(&store), Arc::clone(&clock)),
            mutations: TaskMutationService::new(guard, Arc::clone(&store), clock),
            queries: TaskQueryService::new(Arc::clone(&store)),
            dashboard: DashboardService::new(Arc::clone(&store), store),
        }
    }

    /// Creates a list owned by the given user.
    pub async fn seed_list(&self, owner: UserId, title: &str) -> TaskList {
        self.lists
            .create(owner, title)
            .await
            .expect("list creation should succeed")
    }

    /// Creates a pending task in the given list.
    pub async fn seed_task(&self, owner: UserId, list_id: ListId, title: &str) -> Task {
        self.mutations
            .create(owner, TaskDraft::new(title, list_id))
            .await
            .expect("task creation should succeed")
    }
}
