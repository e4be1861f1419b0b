//! Repository port for weekly streak records.

use crate::{streak::domain::WeeklyStreak, user::UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for streak repository operations.
pub type StreakRepositoryResult<T> = Result<T, StreakRepositoryError>;

/// Persistence contract for weekly streaks.
#[async_trait]
pub trait StreakRepository: Send + Sync {
    /// Returns the user's streak, creating an empty one when none exists.
    async fn get_or_create(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> StreakRepositoryResult<WeeklyStreak>;

    /// Stores `streak` when the persisted check-in still equals
    /// `observed_check_in`.
    ///
    /// Returns `false` when a concurrent check-in was stored first.
    ///
    /// # Errors
    ///
    /// Returns [`StreakRepositoryError::NotFound`] when the user has no
    /// streak record.
    async fn save_check_in(
        &self,
        streak: &WeeklyStreak,
        observed_check_in: Option<DateTime<Utc>>,
    ) -> StreakRepositoryResult<bool>;
}

/// Errors returned by streak repository implementations.
#[derive(Debug, Clone, Error)]
pub enum StreakRepositoryError {
    /// The user has no streak record.
    #[error("streak not found for user {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StreakRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
