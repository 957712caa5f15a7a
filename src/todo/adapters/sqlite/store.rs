//! `SQLite` task store built on Diesel and r2d2.

use super::{
    models::{ListMessageRow, NewListMessageRow, NewTodoRow, TodoRow},
    schema::{CREATE_TABLES, list_messages, todos},
};
use crate::todo::{
    domain::{ChannelId, ListSnapshot, MessageId, PersistedTaskData, Task, TaskContent, TaskId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::result::Error as DieselError;
use diesel::sqlite::SqliteConnection;
use mockable::{Clock, DefaultClock};
use std::path::Path;
use std::sync::Arc;

/// `SQLite` connection pool type used by the TODO store.
pub type TodoSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

const IN_MEMORY_DATABASE: &str = ":memory:";

diesel::define_sql_function! {
    /// Row identifier assigned by the most recent insert on this connection.
    fn last_insert_rowid() -> diesel::sql_types::BigInt;
}

/// Applies per-connection pragmas when r2d2 hands out a connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionPragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// `SQLite`-backed task store.
///
/// All Diesel calls run on the blocking thread pool. Identifiers come from
/// `INTEGER PRIMARY KEY AUTOINCREMENT`, so they are never reused even after
/// a reset.
pub struct SqliteTaskStore<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    pool: TodoSqlitePool,
    clock: Arc<C>,
}

impl<C> Clone for SqliteTaskStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl SqliteTaskStore {
    /// Opens (creating if needed) the database at `path`.
    ///
    /// `:memory:` is accepted; the pool is then capped at one connection so
    /// every operation sees the same database.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when `pool_size` is zero, the
    /// pool cannot be built, or the schema cannot be applied.
    pub fn open(path: impl AsRef<Path>, pool_size: u32) -> TaskStoreResult<Self> {
        Self::open_with_clock(path, pool_size, Arc::new(DefaultClock))
    }
}

impl<C> SqliteTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Opens the database at `path`, stamping rows with `clock`.
    ///
    /// # Errors
    ///
    /// See [`SqliteTaskStore::open`].
    pub fn open_with_clock(
        path: impl AsRef<Path>,
        pool_size: u32,
        clock: Arc<C>,
    ) -> TaskStoreResult<Self> {
        if pool_size == 0 {
            return Err(TaskStoreError::persistence(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "sqlite pool size must be at least 1",
            )));
        }

        let database_url = path.as_ref().to_string_lossy().into_owned();
        let in_memory = database_url == IN_MEMORY_DATABASE;
        let mut builder = Pool::builder()
            .max_size(if in_memory { 1 } else { pool_size })
            .connection_customizer(Box::new(ConnectionPragmas));
        if in_memory {
            // Recycling the only connection would drop the database.
            builder = builder.idle_timeout(None).max_lifetime(None);
        }
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = builder
            .build(manager)
            .map_err(TaskStoreError::persistence)?;

        let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
        connection
            .batch_execute(CREATE_TABLES)
            .map_err(TaskStoreError::persistence)?;

        Ok(Self::new(pool, clock))
    }

    /// Creates a store from an existing pool whose schema is already in
    /// place.
    #[must_use]
    pub const fn new(pool: TodoSqlitePool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.utc().naive_utc()
    }
}

#[async_trait]
impl<C> TaskStore for SqliteTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn insert_task(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        content: &TaskContent,
    ) -> TaskStoreResult<TaskId> {
        let new_row = NewTodoRow {
            channel_id: channel_id.as_str().to_owned(),
            message_id: message_id.as_str().to_owned(),
            content: content.as_str().to_owned(),
            completed: false,
            created_at: self.now(),
        };

        let raw_id = self
            .run_blocking(move |connection| {
                connection
                    .transaction::<i64, DieselError, _>(|tx| {
                        diesel::insert_into(todos::table)
                            .values(&new_row)
                            .execute(tx)?;
                        diesel::select(last_insert_rowid()).get_result::<i64>(tx)
                    })
                    .map_err(TaskStoreError::persistence)
            })
            .await?;

        TaskId::new(raw_id).map_err(TaskStoreError::persistence)
    }

    async fn list_tasks(&self, channel_id: &ChannelId) -> TaskStoreResult<Vec<Task>> {
        let channel = channel_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = todos::table
                .filter(todos::channel_id.eq(&channel))
                .order((todos::created_at.desc(), todos::id.desc()))
                .select(TodoRow::as_select())
                .load::<TodoRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_task_message_ids(
        &self,
        channel_id: &ChannelId,
    ) -> TaskStoreResult<Vec<MessageId>> {
        let channel = channel_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let ids = todos::table
                .filter(todos::channel_id.eq(&channel))
                .order(todos::id.asc())
                .select(todos::message_id)
                .load::<String>(connection)
                .map_err(TaskStoreError::persistence)?;
            ids.into_iter()
                .map(|raw| MessageId::new(raw).map_err(TaskStoreError::persistence))
                .collect()
        })
        .await
    }

    async fn set_completed(&self, task_id: TaskId) -> TaskStoreResult<u64> {
        let id = task_id.value();
        let updated = self
            .run_blocking(move |connection| {
                connection
                    .transaction::<Option<usize>, DieselError, _>(|tx| {
                        let changed = diesel::update(
                            todos::table
                                .filter(todos::id.eq(id))
                                .filter(todos::completed.eq(false)),
                        )
                        .set(todos::completed.eq(true))
                        .execute(tx)?;
                        if changed > 0 {
                            return Ok(Some(changed));
                        }
                        let exists = diesel::select(diesel::dsl::exists(
                            todos::table.filter(todos::id.eq(id)),
                        ))
                        .get_result::<bool>(tx)?;
                        Ok(exists.then_some(0))
                    })
                    .map_err(TaskStoreError::persistence)
            })
            .await?;

        let changed = updated.ok_or(TaskStoreError::NotFound(task_id))?;
        u64::try_from(changed).map_err(TaskStoreError::persistence)
    }

    async fn find_task(&self, task_id: TaskId) -> TaskStoreResult<Option<Task>> {
        let id = task_id.value();
        self.run_blocking(move |connection| {
            let row = todos::table
                .filter(todos::id.eq(id))
                .select(TodoRow::as_select())
                .first::<TodoRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete_all_tasks(&self, channel_id: &ChannelId) -> TaskStoreResult<u64> {
        let channel = channel_id.as_str().to_owned();
        let removed = self
            .run_blocking(move |connection| {
                diesel::delete(todos::table.filter(todos::channel_id.eq(&channel)))
                    .execute(connection)
                    .map_err(TaskStoreError::persistence)
            })
            .await?;
        u64::try_from(removed).map_err(TaskStoreError::persistence)
    }

    async fn insert_list_snapshot(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> TaskStoreResult<()> {
        let new_row = NewListMessageRow {
            channel_id: channel_id.as_str().to_owned(),
            message_id: message_id.as_str().to_owned(),
            created_at: self.now(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(list_messages::table)
                .values(&new_row)
                .execute(connection)
                .map(|_| ())
                .map_err(TaskStoreError::persistence)
        })
        .await
    }

    async fn list_snapshots(&self, channel_id: &ChannelId) -> TaskStoreResult<Vec<ListSnapshot>> {
        let channel = channel_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = list_messages::table
                .filter(list_messages::channel_id.eq(&channel))
                .order((list_messages::created_at.asc(), list_messages::id.asc()))
                .select(ListMessageRow::as_select())
                .load::<ListMessageRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_snapshot).collect()
        })
        .await
    }

    async fn delete_all_snapshots(&self, channel_id: &ChannelId) -> TaskStoreResult<u64> {
        let channel = channel_id.as_str().to_owned();
        let removed = self
            .run_blocking(move |connection| {
                diesel::delete(list_messages::table.filter(list_messages::channel_id.eq(&channel)))
                    .execute(connection)
                    .map_err(TaskStoreError::persistence)
            })
            .await?;
        u64::try_from(removed).map_err(TaskStoreError::persistence)
    }
}

fn to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(naive, Utc)
}

fn row_to_task(row: TodoRow) -> TaskStoreResult<Task> {
    let TodoRow {
        id,
        channel_id,
        message_id,
        content,
        completed,
        created_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id).map_err(TaskStoreError::persistence)?,
        channel_id: ChannelId::new(channel_id).map_err(TaskStoreError::persistence)?,
        message_id: MessageId::new(message_id).map_err(TaskStoreError::persistence)?,
        content: TaskContent::new(content).map_err(TaskStoreError::persistence)?,
        completed,
        created_at: to_utc(created_at),
    };
    Ok(Task::from_persisted(data))
}

fn row_to_snapshot(row: ListMessageRow) -> TaskStoreResult<ListSnapshot> {
    Ok(ListSnapshot::new(
        ChannelId::new(row.channel_id).map_err(TaskStoreError::persistence)?,
        MessageId::new(row.message_id).map_err(TaskStoreError::persistence)?,
        to_utc(row.created_at),
    ))
}
