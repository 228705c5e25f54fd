//! In-memory store backing both repository ports.
//!
//! Lists and tasks share one lock so that deleting a list and cascading to
//! its tasks is a single atomic step, mirroring the relational schema's
//! `ON DELETE CASCADE`.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::tasks::{
    domain::{ListId, StatusFilter, Task, TaskId, TaskList, UserId},
    ports::{
        ListRepository, RepositoryError, RepositoryResult, TaskFilter, TaskRepository,
        TaskStatusCounts,
    },
};

/// Thread-safe in-memory list and task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    lists: HashMap<ListId, TaskList>,
    tasks: HashMap<TaskId, Task>,
}

impl StoreState {
    /// Identifiers of every list owned by the given user.
    fn owned_list_ids(&self, owner: UserId) -> HashSet<ListId> {
        self.lists
            .values()
            .filter(|list| list.is_owned_by(owner))
            .map(TaskList::id)
            .collect()
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> RepositoryResult<std::sync::RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> RepositoryResult<std::sync::RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

/// Case-insensitive substring match on title or description.
fn matches_search(task: &Task, term: &str) -> bool {
    let needle = term.to_lowercase();
    if task.title().as_str().to_lowercase().contains(&needle) {
        return true;
    }
    task.description()
        .is_some_and(|description| description.to_lowercase().contains(&needle))
}

fn matches_status(task: &Task, status: StatusFilter) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Completed => task.is_completed(),
        StatusFilter::Pending => !task.is_completed(),
    }
}

/// All tasks matching the filter, most recently created first with ties
/// broken by id descending.
fn matching_tasks(state: &StoreState, filter: &TaskFilter) -> Vec<Task> {
    let owned = state.owned_list_ids(filter.owner());
    let mut matched: Vec<Task> = state
        .tasks
        .values()
        .filter(|task| owned.contains(&task.list_id()))
        .filter(|task| filter.search().is_none_or(|term| matches_search(task, term)))
        .filter(|task| matches_status(task, filter.status()))
        .cloned()
        .collect();
    matched.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
    matched
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn to_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

#[async_trait]
impl ListRepository for InMemoryStore {
    async fn store(&self, list: &TaskList) -> RepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.lists.contains_key(&list.id()) {
            return Err(RepositoryError::DuplicateList(list.id()));
        }
        state.lists.insert(list.id(), list.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ListId) -> RepositoryResult<Option<TaskList>> {
        let state = self.read_state()?;
        Ok(state.lists.get(&id).cloned())
    }

    async fn list_for_owner(&self, owner: UserId) -> RepositoryResult<Vec<TaskList>> {
        let state = self.read_state()?;
        let mut lists: Vec<TaskList> = state
            .lists
            .values()
            .filter(|list| list.is_owned_by(owner))
            .cloned()
            .collect();
        lists.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(lists)
    }

    async fn delete(&self, id: ListId) -> RepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.lists.remove(&id).is_none() {
            return Err(RepositoryError::ListNotFound(id));
        }
        state.tasks.retain(|_, task| task.list_id() != id);
        Ok(())
    }

    async fn count_for_owner(&self, owner: UserId) -> RepositoryResult<u64> {
        let state = self.read_state()?;
        let count = state
            .lists
            .values()
            .filter(|list| list.is_owned_by(owner))
            .count();
        Ok(to_u64(count))
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn store(&self, task: &Task) -> RepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(RepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> RepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(RepositoryError::TaskNotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn delete(&self, id: TaskId) -> RepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.tasks.remove(&id).is_none() {
            return Err(RepositoryError::TaskNotFound(id));
        }
        Ok(())
    }

    async fn search(
        &self,
        filter: &TaskFilter,
        limit: u64,
        offset: u64,
    ) -> RepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        let page = matching_tasks(&state, filter)
            .into_iter()
            .skip(to_usize(offset))
            .take(to_usize(limit))
            .collect();
        Ok(page)
    }

    async fn count(&self, filter: &TaskFilter) -> RepositoryResult<u64> {
        let state = self.read_state()?;
        Ok(to_u64(matching_tasks(&state, filter).len()))
    }

    async fn status_counts(&self, owner: UserId) -> RepositoryResult<TaskStatusCounts> {
        let state = self.read_state()?;
        let owned = state.owned_list_ids(owner);
        let mut counts = TaskStatusCounts::default();
        for task in state.tasks.values() {
            if !owned.contains(&task.list_id()) {
                continue;
            }
            counts.total += 1;
            if task.is_completed() {
                counts.completed += 1;
            }
        }
        Ok(counts)
    }
}
