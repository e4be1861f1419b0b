//! Thread-safe streak map.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{
    streak::{
        domain::WeeklyStreak,
        ports::{StreakRepository, StreakRepositoryError, StreakRepositoryResult},
    },
    user::UserId,
};

/// In-memory streak repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStreakRepository {
    streaks: Arc<RwLock<HashMap<UserId, WeeklyStreak>>>,
}

impl InMemoryStreakRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `streak` verbatim, replacing any record of its user.
    ///
    /// # Errors
    ///
    /// Returns [`StreakRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn insert(&self, streak: WeeklyStreak) -> StreakRepositoryResult<()> {
        let mut streaks = self.streaks.write().map_err(lock_error)?;
        streaks.insert(streak.user_id(), streak);
        Ok(())
    }
}

fn lock_error(err: impl std::fmt::Display) -> StreakRepositoryError {
    StreakRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl StreakRepository for InMemoryStreakRepository {
    async fn get_or_create(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> StreakRepositoryResult<WeeklyStreak> {
        let mut streaks = self.streaks.write().map_err(lock_error)?;
        let streak = streaks
            .entry(user_id)
            .or_insert_with(|| WeeklyStreak::new(user_id, now));
        Ok(streak.clone())
    }

    async fn save_check_in(
        &self,
        streak: &WeeklyStreak,
        observed_check_in: Option<DateTime<Utc>>,
    ) -> StreakRepositoryResult<bool> {
        let mut streaks = self.streaks.write().map_err(lock_error)?;
        let stored = streaks
            .get_mut(&streak.user_id())
            .ok_or(StreakRepositoryError::NotFound(streak.user_id()))?;
        if stored.last_check_in() != observed_check_in {
            return Ok(false);
        }
        *stored = streak.clone();
        Ok(true)
    }
}
