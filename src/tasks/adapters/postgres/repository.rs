//! `PostgreSQL` store implementing both repository ports.

use super::{
    models::{ListRow, NewListRow, NewTaskRow, TaskChangeset, TaskRow},
    schema::{lists, tasks},
};
use crate::tasks::{
    domain::{
        ListId, PersistedListData, PersistedTaskData, StatusFilter, Task, TaskId, TaskList, Title,
        UserId,
    },
    ports::{
        ListRepository, RepositoryError, RepositoryResult, TaskFilter, TaskRepository,
        TaskStatusCounts,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the store.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed list and task store.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RepositoryError::persistence)?
    }
}

fn row_to_list(row: ListRow) -> RepositoryResult<TaskList> {
    let title = Title::new(row.title).map_err(RepositoryError::persistence)?;
    Ok(TaskList::from_persisted(PersistedListData {
        id: ListId::from_uuid(row.id),
        title,
        owner: UserId::from_uuid(row.user_id),
        created_at: row.created_at,
    }))
}

fn row_to_task(row: TaskRow) -> RepositoryResult<Task> {
    let title = Title::new(row.title).map_err(RepositoryError::persistence)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        title,
        description: row.description,
        due_date: row.due_date,
        list_id: ListId::from_uuid(row.list_id),
        is_completed: row.is_completed,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn to_new_list_row(list: &TaskList) -> NewListRow {
    NewListRow {
        id: list.id().into_inner(),
        title: list.title().as_str().to_owned(),
        user_id: list.owner().into_inner(),
        created_at: list.created_at(),
    }
}

fn to_new_task_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        due_date: task.due_date(),
        list_id: task.list_id().into_inner(),
        is_completed: task.is_completed(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_task_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        due_date: task.due_date(),
        list_id: task.list_id().into_inner(),
        is_completed: task.is_completed(),
        updated_at: task.updated_at(),
    }
}

/// Escapes `LIKE` metacharacters so the search term matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn like_pattern(filter: &TaskFilter) -> Option<String> {
    filter.search().map(|term| format!("%{}%", escape_like(term)))
}

fn count_u64(value: i64) -> RepositoryResult<u64> {
    u64::try_from(value).map_err(RepositoryError::persistence)
}

fn page_bound(value: u64) -> RepositoryResult<i64> {
    i64::try_from(value).map_err(RepositoryError::persistence)
}

#[async_trait]
impl ListRepository for PostgresStore {
    async fn store(&self, list: &TaskList) -> RepositoryResult<()> {
        let list_id = list.id();
        let new_row = to_new_list_row(list);
        self.run_blocking(move |connection| {
            diesel::insert_into(lists::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::DuplicateList(list_id)
                    }
                    _ => RepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ListId) -> RepositoryResult<Option<TaskList>> {
        self.run_blocking(move |connection| {
            let row = lists::table
                .find(id.into_inner())
                .select(ListRow::as_select())
                .first::<ListRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?;
            row.map(row_to_list).transpose()
        })
        .await
    }

    async fn list_for_owner(&self, owner: UserId) -> RepositoryResult<Vec<TaskList>> {
        self.run_blocking(move |connection| {
            let rows = lists::table
                .filter(lists::user_id.eq(owner.into_inner()))
                .order((lists::created_at.desc(), lists::id.desc()))
                .select(ListRow::as_select())
                .load::<ListRow>(connection)
                .map_err(RepositoryError::persistence)?;
            rows.into_iter().map(row_to_list).collect()
        })
        .await
    }

    async fn delete(&self, id: ListId) -> RepositoryResult<()> {
        // Contained tasks go with the list via ON DELETE CASCADE.
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(lists::table.find(id.into_inner()))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            if deleted == 0 {
                return Err(RepositoryError::ListNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn count_for_owner(&self, owner: UserId) -> RepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let total = lists::table
                .filter(lists::user_id.eq(owner.into_inner()))
                .count()
                .get_result::<i64>(connection)
                .map_err(RepositoryError::persistence)?;
            count_u64(total)
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresStore {
    async fn store(&self, task: &Task) -> RepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_task_row(task);
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::DuplicateTask(task_id)
                    }
                    _ => RepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> RepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_task_changeset(task);
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            if updated == 0 {
                return Err(RepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> RepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            if deleted == 0 {
                return Err(RepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn search(
        &self,
        filter: &TaskFilter,
        limit: u64,
        offset: u64,
    ) -> RepositoryResult<Vec<Task>> {
        let owner = filter.owner().into_inner();
        let pattern = like_pattern(filter);
        let status = filter.status();
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .inner_join(lists::table)
                .filter(lists::user_id.eq(owner))
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .select(TaskRow::as_select())
                .into_boxed();
            if let Some(pattern) = pattern {
                query = query.filter(
                    tasks::title
                        .ilike(pattern.clone())
                        .nullable()
                        .or(tasks::description.ilike(pattern)),
                );
            }
            match status {
                StatusFilter::All => {}
                StatusFilter::Completed => query = query.filter(tasks::is_completed.eq(true)),
                StatusFilter::Pending => query = query.filter(tasks::is_completed.eq(false)),
            }
            let rows = query
                .offset(page_bound(offset)?)
                .limit(page_bound(limit)?)
                .load::<TaskRow>(connection)
                .map_err(RepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count(&self, filter: &TaskFilter) -> RepositoryResult<u64> {
        let owner = filter.owner().into_inner();
        let pattern = like_pattern(filter);
        let status = filter.status();
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .inner_join(lists::table)
                .filter(lists::user_id.eq(owner))
                .count()
                .into_boxed();
            if let Some(pattern) = pattern {
                query = query.filter(
                    tasks::title
                        .ilike(pattern.clone())
                        .nullable()
                        .or(tasks::description.ilike(pattern)),
                );
            }
            match status {
                StatusFilter::All => {}
                StatusFilter::Completed => query = query.filter(tasks::is_completed.eq(true)),
                StatusFilter::Pending => query = query.filter(tasks::is_completed.eq(false)),
            }
            let total = query
                .get_result::<i64>(connection)
                .map_err(RepositoryError::persistence)?;
            count_u64(total)
        })
        .await
    }

    async fn status_counts(&self, owner: UserId) -> RepositoryResult<TaskStatusCounts> {
        let owner_uuid = owner.into_inner();
        self.run_blocking(move |connection| {
            let total = tasks::table
                .inner_join(lists::table)
                .filter(lists::user_id.eq(owner_uuid))
                .count()
                .get_result::<i64>(connection)
                .map_err(RepositoryError::persistence)?;
            let completed = tasks::table
                .inner_join(lists::table)
                .filter(lists::user_id.eq(owner_uuid))
                .filter(tasks::is_completed.eq(true))
                .count()
                .get_result::<i64>(connection)
                .map_err(RepositoryError::persistence)?;
            Ok(TaskStatusCounts {
                total: count_u64(total)?,
                completed: count_u64(completed)?,
            })
        })
        .await
    }
}
