//! In-memory store for per-user progress records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{
    daily_task::{
        domain::{CompletionRecord, DAILY_TASK_COUNT, DailyTaskProgress},
        ports::{ProgressTracker, ProgressTrackerError, ProgressTrackerResult},
    },
    user::UserId,
};

/// Thread-safe in-memory progress tracker.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgressTracker {
    records: Arc<RwLock<HashMap<UserId, DailyTaskProgress>>>,
}

impl InMemoryProgressTracker {
    /// Creates an empty in-memory tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `progress` verbatim, replacing any existing record of its
    /// user.
    ///
    /// Used to seed state that the engine would otherwise only reach by
    /// waiting for wall-clock time to pass.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressTrackerError::Persistence`] when the lock is
    /// poisoned.
    pub fn insert(&self, progress: DailyTaskProgress) -> ProgressTrackerResult<()> {
        let mut records = self.records.write().map_err(lock_error)?;
        records.insert(progress.user_id(), progress);
        Ok(())
    }
}

fn lock_error(err: impl std::fmt::Display) -> ProgressTrackerError {
    ProgressTrackerError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProgressTracker for InMemoryProgressTracker {
    async fn get_or_create(
        &self,
        user_id: UserId,
        next_reset_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> ProgressTrackerResult<DailyTaskProgress> {
        let mut records = self.records.write().map_err(lock_error)?;
        let progress = records
            .entry(user_id)
            .or_insert_with(|| DailyTaskProgress::new(user_id, next_reset_at, now));
        Ok(progress.clone())
    }

    async fn record_completion(
        &self,
        user_id: UserId,
        expected_count: u8,
        record: &CompletionRecord,
    ) -> ProgressTrackerResult<()> {
        let mut records = self.records.write().map_err(lock_error)?;
        let progress = records
            .get_mut(&user_id)
            .ok_or(ProgressTrackerError::NotFound(user_id))?;
        if progress.completed_count() != expected_count
            || progress.completed_count() >= DAILY_TASK_COUNT
        {
            return Err(ProgressTrackerError::Conflict(user_id));
        }
        progress.apply_completion(record, record.completed_at);
        Ok(())
    }

    async fn release_completion(
        &self,
        user_id: UserId,
        claimed: &CompletionRecord,
        previous: &DailyTaskProgress,
    ) -> ProgressTrackerResult<bool> {
        let mut records = self.records.write().map_err(lock_error)?;
        let progress = records
            .get_mut(&user_id)
            .ok_or(ProgressTrackerError::NotFound(user_id))?;
        if !progress.holds_claim(claimed) {
            return Ok(false);
        }
        progress.apply_release(previous, claimed.completed_at);
        Ok(true)
    }

    async fn reset_for_new_day(
        &self,
        user_id: UserId,
        observed_reset_at: DateTime<Utc>,
        next_reset_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> ProgressTrackerResult<bool> {
        let mut records = self.records.write().map_err(lock_error)?;
        let progress = records
            .get_mut(&user_id)
            .ok_or(ProgressTrackerError::NotFound(user_id))?;
        if progress.next_reset_at() != observed_reset_at {
            return Ok(false);
        }
        progress.apply_reset(next_reset_at, now);
        Ok(true)
    }
}
