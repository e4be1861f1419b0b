//! Repository port for the per-day task sets.

use crate::{
    calendar::DayWindow,
    daily_task::domain::{DailyTask, DailyTaskId},
    user::UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for daily task store operations.
pub type DailyTaskStoreResult<T> = Result<T, DailyTaskStoreError>;

/// Persistence contract for daily task sets.
#[async_trait]
pub trait DailyTaskStore: Send + Sync {
    /// Returns the user's set belonging to `window`, ordered by task number.
    ///
    /// A set belongs to the window when its `reset_at` lies in
    /// `(window.start, window.end]`. Returns an empty vector when the user
    /// has no set for the day yet.
    async fn find_for_day(
        &self,
        user_id: UserId,
        window: DayWindow,
    ) -> DailyTaskStoreResult<Vec<DailyTask>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: DailyTaskId) -> DailyTaskStoreResult<Option<DailyTask>>;

    /// Creates the five tasks of the set ending at `reset_at`.
    ///
    /// Retry-safe: when some or all tasks of that set already exist they are
    /// kept, only missing numbers are inserted, and the complete set is
    /// returned ordered by task number.
    async fn create_five(
        &self,
        user_id: UserId,
        reset_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> DailyTaskStoreResult<Vec<DailyTask>>;

    /// Marks an uncompleted task as completed and returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`DailyTaskStoreError::NotFound`] when the task does not exist
    /// and [`DailyTaskStoreError::AlreadyCompleted`] when it was completed
    /// before.
    async fn mark_completed(
        &self,
        id: DailyTaskId,
        completed_at: DateTime<Utc>,
    ) -> DailyTaskStoreResult<DailyTask>;

    /// Deletes the user's tasks whose `reset_at` is strictly before
    /// `boundary` and returns how many were removed.
    async fn delete_older_than(
        &self,
        user_id: UserId,
        boundary: DateTime<Utc>,
    ) -> DailyTaskStoreResult<usize>;
}

/// Errors returned by daily task store implementations.
#[derive(Debug, Clone, Error)]
pub enum DailyTaskStoreError {
    /// The task was not found.
    #[error("daily task not found: {0}")]
    NotFound(DailyTaskId),

    /// The task had already been completed.
    #[error("daily task already completed: {0}")]
    AlreadyCompleted(DailyTaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DailyTaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
