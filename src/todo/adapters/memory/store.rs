//! In-memory task store for tests and local runs.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::todo::{
    domain::{ChannelId, ListSnapshot, MessageId, PersistedTaskData, Task, TaskContent, TaskId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Identifiers are assigned from a counter starting at 1, like an
/// auto-increment primary key.
pub struct InMemoryTaskStore<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryTodoState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryTodoState {
    last_task_id: i64,
    tasks: BTreeMap<TaskId, Task>,
    snapshots: Vec<ListSnapshot>,
    unavailable: bool,
}

impl InMemoryTaskStore {
    /// Creates an empty store stamped by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store stamped by the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTodoState::default())),
            clock,
        }
    }

    /// Makes every subsequent operation fail with a persistence error until
    /// switched back.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn set_unavailable(&self, unavailable: bool) -> TaskStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        state.unavailable = unavailable;
        Ok(())
    }

    fn read(&self) -> TaskStoreResult<RwLockReadGuard<'_, InMemoryTodoState>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        ensure_available(&state)?;
        Ok(state)
    }

    fn write(&self) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryTodoState>> {
        let state = self
            .state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        ensure_available(&state)?;
        Ok(state)
    }
}

fn ensure_available(state: &InMemoryTodoState) -> TaskStoreResult<()> {
    if state.unavailable {
        return Err(TaskStoreError::persistence(std::io::Error::new(
            std::io::ErrorKind::NotConnected,
            "in-memory task store marked unavailable",
        )));
    }
    Ok(())
}

fn channel_tasks<'a>(
    state: &'a InMemoryTodoState,
    channel_id: &'a ChannelId,
) -> impl Iterator<Item = &'a Task> {
    state
        .tasks
        .values()
        .filter(move |task| task.channel_id() == channel_id)
}

#[async_trait]
impl<C> TaskStore for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn insert_task(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        content: &TaskContent,
    ) -> TaskStoreResult<TaskId> {
        let mut state = self.write()?;
        let next_value = state.last_task_id + 1;
        let task_id = TaskId::new(next_value).map_err(TaskStoreError::persistence)?;
        let task = Task::from_persisted(PersistedTaskData {
            id: task_id,
            channel_id: channel_id.clone(),
            message_id: message_id.clone(),
            content: content.clone(),
            completed: false,
            created_at: self.clock.utc(),
        });
        state.last_task_id = next_value;
        state.tasks.insert(task_id, task);
        Ok(task_id)
    }

    async fn list_tasks(&self, channel_id: &ChannelId) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = channel_tasks(&state, channel_id).cloned().collect();
        tasks.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| right.id().cmp(&left.id()))
        });
        Ok(tasks)
    }

    async fn list_task_message_ids(
        &self,
        channel_id: &ChannelId,
    ) -> TaskStoreResult<Vec<MessageId>> {
        let state = self.read()?;
        Ok(channel_tasks(&state, channel_id)
            .map(|task| task.message_id().clone())
            .collect())
    }

    async fn set_completed(&self, task_id: TaskId) -> TaskStoreResult<u64> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .get_mut(&task_id)
            .ok_or(TaskStoreError::NotFound(task_id))?;
        Ok(u64::from(task.mark_completed()))
    }

    async fn find_task(&self, task_id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&task_id).cloned())
    }

    async fn delete_all_tasks(&self, channel_id: &ChannelId) -> TaskStoreResult<u64> {
        let mut state = self.write()?;
        let before = state.tasks.len();
        state.tasks.retain(|_, task| task.channel_id() != channel_id);
        let removed = before - state.tasks.len();
        u64::try_from(removed).map_err(TaskStoreError::persistence)
    }

    async fn insert_list_snapshot(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        let snapshot = ListSnapshot::new(channel_id.clone(), message_id.clone(), self.clock.utc());
        state.snapshots.push(snapshot);
        Ok(())
    }

    async fn list_snapshots(&self, channel_id: &ChannelId) -> TaskStoreResult<Vec<ListSnapshot>> {
        let state = self.read()?;
        Ok(state
            .snapshots
            .iter()
            .filter(|snapshot| snapshot.channel_id() == channel_id)
            .cloned()
            .collect())
    }

    async fn delete_all_snapshots(&self, channel_id: &ChannelId) -> TaskStoreResult<u64> {
        let mut state = self.write()?;
        let before = state.snapshots.len();
        state
            .snapshots
            .retain(|snapshot| snapshot.channel_id() != channel_id);
        let removed = before - state.snapshots.len();
        u64::try_from(removed).map_err(TaskStoreError::persistence)
    }
}
