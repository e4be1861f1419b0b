//! `PostgreSQL` store for per-user progress records.

use super::{
    models::{NewProgressRow, ProgressRow},
    schema::daily_task_progress,
};
use crate::{
    daily_task::{
        domain::{CompletionRecord, DAILY_TASK_COUNT, DailyTaskProgress},
        ports::{ProgressTracker, ProgressTrackerError, ProgressTrackerResult},
    },
    persistence::{PgPool, run_blocking},
    user::UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed progress tracker.
///
/// Every write is a single conditional `UPDATE`, so the row-level atomicity
/// of the database is what serializes concurrent requests for one user.
#[derive(Debug, Clone)]
pub struct PostgresProgressTracker {
    pool: PgPool,
}

impl PostgresProgressTracker {
    /// Creates a new tracker from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressTracker for PostgresProgressTracker {
    async fn get_or_create(
        &self,
        user_id: UserId,
        next_reset_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> ProgressTrackerResult<DailyTaskProgress> {
        let new_row = NewProgressRow::from(&DailyTaskProgress::new(user_id, next_reset_at, now));
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(daily_task_progress::table)
                .values(&new_row)
                .on_conflict(daily_task_progress::user_id)
                .do_nothing()
                .execute(connection)
                .map_err(ProgressTrackerError::persistence)?;

            let row = daily_task_progress::table
                .filter(daily_task_progress::user_id.eq(user_id.into_inner()))
                .select(ProgressRow::as_select())
                .first::<ProgressRow>(connection)
                .map_err(ProgressTrackerError::persistence)?;
            Ok(DailyTaskProgress::try_from(row)?)
        })
        .await
    }

    async fn record_completion(
        &self,
        user_id: UserId,
        expected_count: u8,
        record: &CompletionRecord,
    ) -> ProgressTrackerResult<()> {
        let completion = *record;
        run_blocking(&self.pool, move |connection| {
            let affected = diesel::update(
                daily_task_progress::table
                    .filter(daily_task_progress::user_id.eq(user_id.into_inner()))
                    .filter(daily_task_progress::completed_count.eq(i16::from(expected_count)))
                    .filter(daily_task_progress::completed_count.lt(i16::from(DAILY_TASK_COUNT))),
            )
            .set((
                daily_task_progress::completed_count.eq(i16::from(completion.completed_count)),
                daily_task_progress::last_completed_at.eq(Some(completion.completed_at)),
                daily_task_progress::cooldown_end.eq(Some(completion.cooldown_end)),
                daily_task_progress::next_reset_at.eq(completion.next_reset_at),
                daily_task_progress::updated_at.eq(completion.completed_at),
            ))
            .execute(connection)
            .map_err(ProgressTrackerError::persistence)?;

            if affected > 0 {
                return Ok(());
            }
            if record_exists(connection, user_id)? {
                Err(ProgressTrackerError::Conflict(user_id))
            } else {
                Err(ProgressTrackerError::NotFound(user_id))
            }
        })
        .await
    }

    async fn release_completion(
        &self,
        user_id: UserId,
        claimed: &CompletionRecord,
        previous: &DailyTaskProgress,
    ) -> ProgressTrackerResult<bool> {
        let claim = *claimed;
        let claimed_count = i16::from(claim.completed_count);
        let restored_count = i16::from(previous.completed_count());
        let restored_last = previous.last_completed_at();
        let restored_cooldown = previous.cooldown_end();
        run_blocking(&self.pool, move |connection| {
            let affected = diesel::update(
                daily_task_progress::table
                    .filter(daily_task_progress::user_id.eq(user_id.into_inner()))
                    .filter(daily_task_progress::completed_count.eq(claimed_count))
                    .filter(daily_task_progress::last_completed_at.eq(claim.completed_at))
                    .filter(daily_task_progress::next_reset_at.eq(claim.next_reset_at)),
            )
            .set((
                daily_task_progress::completed_count.eq(restored_count),
                daily_task_progress::last_completed_at.eq(restored_last),
                daily_task_progress::cooldown_end.eq(restored_cooldown),
                daily_task_progress::updated_at.eq(claim.completed_at),
            ))
            .execute(connection)
            .map_err(ProgressTrackerError::persistence)?;

            if affected > 0 {
                return Ok(true);
            }
            if record_exists(connection, user_id)? {
                Ok(false)
            } else {
                Err(ProgressTrackerError::NotFound(user_id))
            }
        })
        .await
    }

    async fn reset_for_new_day(
        &self,
        user_id: UserId,
        observed_reset_at: DateTime<Utc>,
        next_reset_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> ProgressTrackerResult<bool> {
        run_blocking(&self.pool, move |connection| {
            let affected = diesel::update(
                daily_task_progress::table
                    .filter(daily_task_progress::user_id.eq(user_id.into_inner()))
                    .filter(daily_task_progress::next_reset_at.eq(observed_reset_at)),
            )
            .set((
                daily_task_progress::completed_count.eq(0_i16),
                daily_task_progress::last_completed_at.eq(None::<DateTime<Utc>>),
                daily_task_progress::cooldown_end.eq(None::<DateTime<Utc>>),
                daily_task_progress::next_reset_at.eq(next_reset_at),
                daily_task_progress::updated_at.eq(now),
            ))
            .execute(connection)
            .map_err(ProgressTrackerError::persistence)?;

            if affected > 0 {
                return Ok(true);
            }
            if record_exists(connection, user_id)? {
                Ok(false)
            } else {
                Err(ProgressTrackerError::NotFound(user_id))
            }
        })
        .await
    }
}

fn record_exists(connection: &mut PgConnection, user_id: UserId) -> ProgressTrackerResult<bool> {
    diesel::select(diesel::dsl::exists(
        daily_task_progress::table.filter(daily_task_progress::user_id.eq(user_id.into_inner())),
    ))
    .get_result::<bool>(connection)
    .map_err(ProgressTrackerError::persistence)
}
