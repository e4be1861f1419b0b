//! `PostgreSQL` store for daily task sets.

use super::{
    models::{DailyTaskRow, NewDailyTaskRow},
    schema::daily_tasks,
};
use crate::{
    calendar::DayWindow,
    daily_task::{
        domain::{DailyTask, DailyTaskId},
        ports::{DailyTaskStore, DailyTaskStoreError, DailyTaskStoreResult},
    },
    persistence::{PersistenceError, PgPool, run_blocking},
    user::UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed daily task store.
#[derive(Debug, Clone)]
pub struct PostgresDailyTaskStore {
    pool: PgPool,
}

impl PostgresDailyTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DailyTaskStore for PostgresDailyTaskStore {
    async fn find_for_day(
        &self,
        user_id: UserId,
        window: DayWindow,
    ) -> DailyTaskStoreResult<Vec<DailyTask>> {
        run_blocking(&self.pool, move |connection| {
            let rows = daily_tasks::table
                .filter(daily_tasks::user_id.eq(user_id.into_inner()))
                .filter(daily_tasks::reset_at.gt(window.start))
                .filter(daily_tasks::reset_at.le(window.end))
                .order((daily_tasks::task_number.asc(), daily_tasks::reset_at.asc()))
                .select(DailyTaskRow::as_select())
                .load::<DailyTaskRow>(connection)
                .map_err(DailyTaskStoreError::persistence)?;
            rows_to_tasks(rows)
        })
        .await
    }

    async fn find_by_id(&self, id: DailyTaskId) -> DailyTaskStoreResult<Option<DailyTask>> {
        run_blocking(&self.pool, move |connection| {
            let row = find_row(connection, id)?;
            row.map(|found| DailyTask::try_from(found).map_err(DailyTaskStoreError::from))
                .transpose()
        })
        .await
    }

    async fn create_five(
        &self,
        user_id: UserId,
        reset_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> DailyTaskStoreResult<Vec<DailyTask>> {
        let new_rows: Vec<NewDailyTaskRow> = DailyTask::fresh_set(user_id, reset_at, now)
            .iter()
            .map(NewDailyTaskRow::from)
            .collect();

        run_blocking(&self.pool, move |connection| {
            let rows = connection.transaction::<_, PersistenceError, _>(|tx| {
                // The (user, set, number) unique constraint turns a retried
                // or concurrent creation into a no-op for existing slots.
                diesel::insert_into(daily_tasks::table)
                    .values(&new_rows)
                    .on_conflict((
                        daily_tasks::user_id,
                        daily_tasks::reset_at,
                        daily_tasks::task_number,
                    ))
                    .do_nothing()
                    .execute(tx)?;

                Ok(daily_tasks::table
                    .filter(daily_tasks::user_id.eq(user_id.into_inner()))
                    .filter(daily_tasks::reset_at.eq(reset_at))
                    .order(daily_tasks::task_number.asc())
                    .select(DailyTaskRow::as_select())
                    .load::<DailyTaskRow>(tx)?)
            })?;
            rows_to_tasks(rows)
        })
        .await
    }

    async fn mark_completed(
        &self,
        id: DailyTaskId,
        completed_at: DateTime<Utc>,
    ) -> DailyTaskStoreResult<DailyTask> {
        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(
                daily_tasks::table
                    .filter(daily_tasks::id.eq(id.into_inner()))
                    .filter(daily_tasks::completed.eq(false)),
            )
            .set((
                daily_tasks::completed.eq(true),
                daily_tasks::completed_at.eq(Some(completed_at)),
            ))
            .returning(DailyTaskRow::as_returning())
            .get_result::<DailyTaskRow>(connection)
            .optional()
            .map_err(DailyTaskStoreError::persistence)?;

            if let Some(row) = updated {
                return Ok(DailyTask::try_from(row)?);
            }
            match find_row(connection, id)? {
                Some(_) => Err(DailyTaskStoreError::AlreadyCompleted(id)),
                None => Err(DailyTaskStoreError::NotFound(id)),
            }
        })
        .await
    }

    async fn delete_older_than(
        &self,
        user_id: UserId,
        boundary: DateTime<Utc>,
    ) -> DailyTaskStoreResult<usize> {
        run_blocking(&self.pool, move |connection| {
            diesel::delete(
                daily_tasks::table
                    .filter(daily_tasks::user_id.eq(user_id.into_inner()))
                    .filter(daily_tasks::reset_at.lt(boundary)),
            )
            .execute(connection)
            .map_err(DailyTaskStoreError::persistence)
        })
        .await
    }
}

fn find_row(
    connection: &mut PgConnection,
    id: DailyTaskId,
) -> DailyTaskStoreResult<Option<DailyTaskRow>> {
    daily_tasks::table
        .filter(daily_tasks::id.eq(id.into_inner()))
        .select(DailyTaskRow::as_select())
        .first::<DailyTaskRow>(connection)
        .optional()
        .map_err(DailyTaskStoreError::persistence)
}

fn rows_to_tasks(rows: Vec<DailyTaskRow>) -> DailyTaskStoreResult<Vec<DailyTask>> {
    rows.into_iter()
        .map(|row| DailyTask::try_from(row).map_err(DailyTaskStoreError::from))
        .collect()
}
