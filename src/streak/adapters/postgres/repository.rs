//! `PostgreSQL` streak repository.

use super::{models::StreakRow, schema::weekly_streaks};
use crate::{
    persistence::{PgPool, run_blocking},
    streak::{
        domain::WeeklyStreak,
        ports::{StreakRepository, StreakRepositoryError, StreakRepositoryResult},
    },
    user::UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// `PostgreSQL`-backed streak repository.
#[derive(Debug, Clone)]
pub struct PostgresStreakRepository {
    pool: PgPool,
}

impl PostgresStreakRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StreakRepository for PostgresStreakRepository {
    async fn get_or_create(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> StreakRepositoryResult<WeeklyStreak> {
        let new_row = StreakRow::from(&WeeklyStreak::new(user_id, now));
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(weekly_streaks::table)
                .values(&new_row)
                .on_conflict(weekly_streaks::user_id)
                .do_nothing()
                .execute(connection)
                .map_err(StreakRepositoryError::persistence)?;

            let row = weekly_streaks::table
                .filter(weekly_streaks::user_id.eq(user_id.into_inner()))
                .select(StreakRow::as_select())
                .first::<StreakRow>(connection)
                .map_err(StreakRepositoryError::persistence)?;
            Ok(WeeklyStreak::from(row))
        })
        .await
    }

    async fn save_check_in(
        &self,
        streak: &WeeklyStreak,
        observed_check_in: Option<DateTime<Utc>>,
    ) -> StreakRepositoryResult<bool> {
        let row = StreakRow::from(streak);
        let user_id = streak.user_id();
        run_blocking(&self.pool, move |connection| {
            let owned = weekly_streaks::table.filter(weekly_streaks::user_id.eq(row.user_id));
            let values = (
                weekly_streaks::mon.eq(row.mon),
                weekly_streaks::tue.eq(row.tue),
                weekly_streaks::wed.eq(row.wed),
                weekly_streaks::thu.eq(row.thu),
                weekly_streaks::fri.eq(row.fri),
                weekly_streaks::sat.eq(row.sat),
                weekly_streaks::sun.eq(row.sun),
                weekly_streaks::last_check_in.eq(row.last_check_in),
                weekly_streaks::updated_at.eq(row.updated_at),
            );
            let affected = match observed_check_in {
                Some(observed) => diesel::update(
                    owned.filter(weekly_streaks::last_check_in.eq(observed)),
                )
                .set(values)
                .execute(connection),
                None => diesel::update(owned.filter(weekly_streaks::last_check_in.is_null()))
                    .set(values)
                    .execute(connection),
            }
            .map_err(StreakRepositoryError::persistence)?;

            if affected > 0 {
                return Ok(true);
            }
            let exists = diesel::select(diesel::dsl::exists(
                weekly_streaks::table.filter(weekly_streaks::user_id.eq(row.user_id)),
            ))
            .get_result::<bool>(connection)
            .map_err(StreakRepositoryError::persistence)?;
            if exists {
                Ok(false)
            } else {
                Err(StreakRepositoryError::NotFound(user_id))
            }
        })
        .await
    }
}
