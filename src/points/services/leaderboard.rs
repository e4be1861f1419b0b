//! Leaderboard queries with limit normalization and rank assignment.

use crate::{
    persistence::{DEFAULT_STORE_TIMEOUT, DeadlineElapsed, with_deadline},
    points::{
        domain::{LeaderboardEntry, clamp_limit},
        ports::{AccountStoreError, LeaderboardRepository},
    },
    user::UserId,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::error;

/// Service-level errors for leaderboard queries.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// The requesting user has no account.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(AccountStoreError),
    /// Repository call exceeded its deadline.
    #[error(transparent)]
    Timeout(#[from] DeadlineElapsed),
}

impl From<AccountStoreError> for LeaderboardError {
    fn from(err: AccountStoreError) -> Self {
        match err {
            AccountStoreError::UserNotFound(user_id) => Self::UserNotFound(user_id),
            other @ AccountStoreError::Persistence(_) => Self::Repository(other),
        }
    }
}

/// Result type for leaderboard operations.
pub type LeaderboardResult<T> = Result<T, LeaderboardError>;

/// Ranking service over a [`LeaderboardRepository`].
#[derive(Clone)]
pub struct LeaderboardService<R>
where
    R: LeaderboardRepository + ?Sized,
{
    repository: Arc<R>,
    store_timeout: Duration,
}

impl<R> LeaderboardService<R>
where
    R: LeaderboardRepository + ?Sized,
{
    /// Creates a leaderboard service with the default datastore deadline.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Overrides the deadline applied to each repository call.
    #[must_use]
    pub const fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Returns the highest-ranked accounts, ranked from 1.
    ///
    /// `limit` is normalized by [`clamp_limit`].
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError`] when the repository fails or times out.
    pub async fn top(&self, limit: Option<i64>) -> LeaderboardResult<Vec<LeaderboardEntry>> {
        let accounts = with_deadline(
            "top_by_points",
            self.store_timeout,
            self.repository.top_by_points(clamp_limit(limit)),
        )
        .await
        .map_err(LeaderboardError::from)
        .and_then(|result| result.map_err(LeaderboardError::from))
        .inspect_err(|err| log_store_failure("top_by_points", None, err))?;

        Ok(accounts
            .iter()
            .zip(1_u64..)
            .map(|(account, rank)| LeaderboardEntry::ranked(account, rank))
            .collect())
    }

    /// Returns the caller's own row.
    ///
    /// Users with equal points share a rank: the rank is one more than the
    /// number of users holding strictly more points.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::UserNotFound`] when the user has no
    /// account, or another [`LeaderboardError`] when the repository fails.
    pub async fn rank_of(&self, user_id: UserId) -> LeaderboardResult<LeaderboardEntry> {
        self.rank_lookup(user_id)
            .await
            .inspect_err(|err| log_store_failure("rank_of", Some(user_id), err))
    }

    async fn rank_lookup(&self, user_id: UserId) -> LeaderboardResult<LeaderboardEntry> {
        let account = with_deadline(
            "find_account",
            self.store_timeout,
            self.repository.find_account(user_id),
        )
        .await??
        .ok_or(LeaderboardError::UserNotFound(user_id))?;

        let ahead = with_deadline(
            "count_with_more_points",
            self.store_timeout,
            self.repository.count_with_more_points(account.points()),
        )
        .await??;

        Ok(LeaderboardEntry::ranked(&account, ahead.saturating_add(1)))
    }
}

fn log_store_failure(operation: &str, user_id: Option<UserId>, err: &LeaderboardError) {
    if matches!(err, LeaderboardError::UserNotFound(_)) {
        return;
    }
    error!(
        operation,
        user_id = %user_id.map(|id| id.to_string()).unwrap_or_default(),
        error = %err,
        "leaderboard store failure"
    );
}
