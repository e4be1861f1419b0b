//! Repository port for per-user progress records.

use crate::{
    daily_task::domain::{CompletionRecord, DailyTaskProgress},
    user::UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for progress tracker operations.
pub type ProgressTrackerResult<T> = Result<T, ProgressTrackerError>;

/// Persistence contract for progress records.
///
/// Writes are conditional on the state the caller observed so that
/// concurrent requests for one user cannot both consume the same slot.
#[async_trait]
pub trait ProgressTracker: Send + Sync {
    /// Returns the user's record, creating an empty one ending at
    /// `next_reset_at` when none exists.
    ///
    /// Concurrent calls for the same user return the same record.
    async fn get_or_create(
        &self,
        user_id: UserId,
        next_reset_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> ProgressTrackerResult<DailyTaskProgress>;

    /// Writes a completion in one update.
    ///
    /// The update applies only while the stored count still equals
    /// `expected_count` and is below the daily limit.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressTrackerError::Conflict`] when the guard fails and
    /// [`ProgressTrackerError::NotFound`] when the user has no record.
    async fn record_completion(
        &self,
        user_id: UserId,
        expected_count: u8,
        record: &CompletionRecord,
    ) -> ProgressTrackerResult<()>;

    /// Undoes a completion written by [`Self::record_completion`] whose task
    /// could not be marked, restoring the counters of `previous`.
    ///
    /// Applies only while `claimed` is still the latest write; returns
    /// `false` when the record has moved on.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressTrackerError::NotFound`] when the user has no
    /// record.
    async fn release_completion(
        &self,
        user_id: UserId,
        claimed: &CompletionRecord,
        previous: &DailyTaskProgress,
    ) -> ProgressTrackerResult<bool>;

    /// Returns the record to the start-of-day state ending at
    /// `next_reset_at`.
    ///
    /// Applies only while the stored boundary still equals `observed_reset_at`;
    /// returns `false` when another request already performed the reset.
    async fn reset_for_new_day(
        &self,
        user_id: UserId,
        observed_reset_at: DateTime<Utc>,
        next_reset_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> ProgressTrackerResult<bool>;
}

/// Errors returned by progress tracker implementations.
#[derive(Debug, Clone, Error)]
pub enum ProgressTrackerError {
    /// The user has no progress record.
    #[error("progress record not found for user {0}")]
    NotFound(UserId),

    /// A conditional write lost against a concurrent update.
    #[error("concurrent progress update for user {0}")]
    Conflict(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProgressTrackerError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
