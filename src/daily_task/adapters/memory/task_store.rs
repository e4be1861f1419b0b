//! In-memory store for daily task sets.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::{
    calendar::DayWindow,
    daily_task::{
        domain::{DailyTask, DailyTaskId, TaskNumber},
        ports::{DailyTaskStore, DailyTaskStoreError, DailyTaskStoreResult},
    },
    user::UserId,
};

/// Thread-safe in-memory daily task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDailyTaskStore {
    state: Arc<RwLock<InMemoryTaskSetState>>,
}

type SetKey = (UserId, DateTime<Utc>);

#[derive(Debug, Default)]
struct InMemoryTaskSetState {
    tasks: HashMap<DailyTaskId, DailyTask>,
    set_index: HashMap<SetKey, BTreeMap<TaskNumber, DailyTaskId>>,
}

impl InMemoryDailyTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tasks across all users and days.
    ///
    /// # Errors
    ///
    /// Returns [`DailyTaskStoreError::Persistence`] when the lock is poisoned.
    pub fn len(&self) -> DailyTaskStoreResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.len())
    }

    /// Returns whether the store holds no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`DailyTaskStoreError::Persistence`] when the lock is poisoned.
    pub fn is_empty(&self) -> DailyTaskStoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn lock_error(err: impl std::fmt::Display) -> DailyTaskStoreError {
    DailyTaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

/// Collects the tasks of one indexed set in task-number order.
fn collect_set(state: &InMemoryTaskSetState, key: &SetKey) -> Vec<DailyTask> {
    state
        .set_index
        .get(key)
        .map(|numbers| {
            numbers
                .values()
                .filter_map(|id| state.tasks.get(id).cloned())
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl DailyTaskStore for InMemoryDailyTaskStore {
    async fn find_for_day(
        &self,
        user_id: UserId,
        window: DayWindow,
    ) -> DailyTaskStoreResult<Vec<DailyTask>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut tasks: Vec<DailyTask> = state
            .set_index
            .keys()
            .filter(|(owner, reset_at)| *owner == user_id && window.owns_boundary(*reset_at))
            .flat_map(|key| collect_set(&state, key))
            .collect();
        tasks.sort_by_key(|task| (task.number(), task.reset_at()));
        Ok(tasks)
    }

    async fn find_by_id(&self, id: DailyTaskId) -> DailyTaskStoreResult<Option<DailyTask>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn create_five(
        &self,
        user_id: UserId,
        reset_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> DailyTaskStoreResult<Vec<DailyTask>> {
        let mut guard = self.state.write().map_err(lock_error)?;
        let state = &mut *guard;
        let key = (user_id, reset_at);
        let numbers = state.set_index.entry(key).or_default();
        for task in DailyTask::fresh_set(user_id, reset_at, now) {
            if numbers.contains_key(&task.number()) {
                continue;
            }
            numbers.insert(task.number(), task.id());
            state.tasks.insert(task.id(), task);
        }
        Ok(collect_set(state, &key))
    }

    async fn mark_completed(
        &self,
        id: DailyTaskId,
        completed_at: DateTime<Utc>,
    ) -> DailyTaskStoreResult<DailyTask> {
        let mut state = self.state.write().map_err(lock_error)?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(DailyTaskStoreError::NotFound(id))?;
        if task.is_completed() {
            return Err(DailyTaskStoreError::AlreadyCompleted(id));
        }
        task.mark_completed(completed_at);
        Ok(task.clone())
    }

    async fn delete_older_than(
        &self,
        user_id: UserId,
        boundary: DateTime<Utc>,
    ) -> DailyTaskStoreResult<usize> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stale_keys: Vec<SetKey> = state
            .set_index
            .keys()
            .filter(|(owner, reset_at)| *owner == user_id && *reset_at < boundary)
            .copied()
            .collect();

        let mut removed = 0;
        for key in stale_keys {
            let Some(numbers) = state.set_index.remove(&key) else {
                continue;
            };
            for id in numbers.values() {
                if state.tasks.remove(id).is_some() {
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }
}
