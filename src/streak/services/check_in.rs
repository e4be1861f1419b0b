//! Check-in orchestration and streak reads.

use crate::{
    calendar::CalendarZone,
    persistence::{DEFAULT_STORE_TIMEOUT, DeadlineElapsed, with_deadline},
    points::ports::{AccountStoreError, PointsLedger},
    streak::{
        domain::{CHECK_IN_POINTS, CheckInOutcome, WeeklyStreak},
        ports::{StreakRepository, StreakRepositoryError},
    },
    user::UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::convert::identity;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

/// Service-level errors for streak operations.
#[derive(Debug, Error)]
pub enum StreakError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] StreakRepositoryError),
    /// Two check-ins for the same user kept colliding.
    #[error("concurrent check-in for user {0}")]
    Conflict(UserId),
    /// Repository call exceeded its deadline.
    #[error(transparent)]
    Timeout(#[from] DeadlineElapsed),
}

/// Result type for streak operations.
pub type StreakResult<T> = Result<T, StreakError>;

/// Outcome of a check-in request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakCheckIn {
    /// The streak after the request.
    pub streak: WeeklyStreak,
    /// Whether this request marked today.
    pub outcome: CheckInOutcome,
    /// Points credited; zero for a repeat check-in or a ledger failure.
    pub points_awarded: i64,
}

/// Weekly streak service.
pub struct StreakService<R, L, C>
where
    R: StreakRepository + ?Sized,
    L: PointsLedger + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    repository: Arc<R>,
    ledger: Arc<L>,
    clock: Arc<C>,
    zone: CalendarZone,
    store_timeout: Duration,
}

impl<R, L, C> Clone for StreakService<R, L, C>
where
    R: StreakRepository + ?Sized,
    L: PointsLedger + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            ledger: Arc::clone(&self.ledger),
            clock: Arc::clone(&self.clock),
            zone: self.zone,
            store_timeout: self.store_timeout,
        }
    }
}

impl<R, L, C> StreakService<R, L, C>
where
    R: StreakRepository + ?Sized,
    L: PointsLedger + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    /// Creates a streak service with the default datastore deadline.
    #[must_use]
    pub const fn new(repository: Arc<R>, ledger: Arc<L>, clock: Arc<C>, zone: CalendarZone) -> Self {
        Self {
            repository,
            ledger,
            clock,
            zone,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Overrides the deadline applied to each repository and ledger call.
    #[must_use]
    pub const fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Returns the streak as it applies to the current week.
    ///
    /// # Errors
    ///
    /// Returns [`StreakError`] when the repository fails or times out.
    pub async fn current(&self, user_id: UserId) -> StreakResult<WeeklyStreak> {
        let now = self.clock.utc();
        self.load(user_id, now)
            .await
            .map(|stored| stored.for_week_of(now, self.zone))
            .inspect_err(|err| log_failure("current_streak", user_id, err))
    }

    /// Returns the number of days checked in the current week.
    ///
    /// # Errors
    ///
    /// Returns [`StreakError`] when the repository fails or times out.
    pub async fn count(&self, user_id: UserId) -> StreakResult<u8> {
        Ok(self.current(user_id).await?.count())
    }

    /// Marks today and credits [`CHECK_IN_POINTS`] on the first check-in
    /// of the day.
    ///
    /// # Errors
    ///
    /// Returns [`StreakError`] when the repository fails or times out, or
    /// [`StreakError::Conflict`] when a concurrent check-in wins twice.
    pub async fn check_in(&self, user_id: UserId) -> StreakResult<StreakCheckIn> {
        let now = self.clock.utc();
        self.check_in_at(user_id, now)
            .await
            .inspect_err(|err| log_failure("check_in", user_id, err))
    }

    async fn check_in_at(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> StreakResult<StreakCheckIn> {
        for _ in 0..2 {
            let mut streak = self.load(user_id, now).await?;
            let observed = streak.last_check_in();
            let outcome = streak.check_in(now, self.zone);
            if outcome == CheckInOutcome::AlreadyCheckedIn {
                return Ok(StreakCheckIn {
                    streak,
                    outcome,
                    points_awarded: 0,
                });
            }

            let saved = with_deadline(
                "save_check_in",
                self.store_timeout,
                self.repository.save_check_in(&streak, observed),
            )
            .await??;
            if saved {
                let points_awarded = self.award_points(user_id).await;
                info!(
                    user_id = %user_id,
                    count = streak.count(),
                    points_awarded,
                    "streak check-in"
                );
                return Ok(StreakCheckIn {
                    streak,
                    outcome,
                    points_awarded,
                });
            }
        }
        Err(StreakError::Conflict(user_id))
    }

    async fn load(&self, user_id: UserId, now: DateTime<Utc>) -> StreakResult<WeeklyStreak> {
        Ok(with_deadline(
            "get_or_create_streak",
            self.store_timeout,
            self.repository.get_or_create(user_id, now),
        )
        .await??)
    }

    async fn award_points(&self, user_id: UserId) -> i64 {
        let outcome = with_deadline(
            "add_points",
            self.store_timeout,
            self.ledger.add_points(user_id, CHECK_IN_POINTS),
        )
        .await
        .map_err(AccountStoreError::persistence)
        .and_then(identity);

        match outcome {
            Ok(()) => CHECK_IN_POINTS,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "check-in point award failed");
                0
            }
        }
    }
}

fn log_failure(operation: &str, user_id: UserId, err: &StreakError) {
    error!(operation, user_id = %user_id, error = %err, "streak store failure");
}
