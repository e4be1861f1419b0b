//! `PostgreSQL` ledger and leaderboard queries.

use super::{models::AccountRow, schema::users};
use crate::{
    persistence::{PgPool, run_blocking},
    points::{
        domain::UserAccount,
        ports::{AccountStoreError, AccountStoreResult, LeaderboardRepository, PointsLedger},
    },
    user::UserId,
};
use async_trait::async_trait;
use diesel::prelude::*;

/// `PostgreSQL`-backed account store.
#[derive(Debug, Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PointsLedger for PostgresAccountStore {
    async fn add_points(&self, user_id: UserId, delta: i64) -> AccountStoreResult<()> {
        run_blocking(&self.pool, move |connection| {
            let affected = diesel::update(users::table.filter(users::id.eq(user_id.into_inner())))
                .set(users::points.eq(users::points + delta))
                .execute(connection)
                .map_err(AccountStoreError::persistence)?;
            if affected == 0 {
                return Err(AccountStoreError::UserNotFound(user_id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl LeaderboardRepository for PostgresAccountStore {
    async fn top_by_points(&self, limit: usize) -> AccountStoreResult<Vec<UserAccount>> {
        let row_limit = i64::try_from(limit).unwrap_or(i64::MAX);
        run_blocking(&self.pool, move |connection| {
            let rows = users::table
                .order((users::points.desc(), users::username.asc()))
                .limit(row_limit)
                .select(AccountRow::as_select())
                .load::<AccountRow>(connection)
                .map_err(AccountStoreError::persistence)?;
            Ok(rows.into_iter().map(UserAccount::from).collect())
        })
        .await
    }

    async fn find_account(&self, user_id: UserId) -> AccountStoreResult<Option<UserAccount>> {
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .filter(users::id.eq(user_id.into_inner()))
                .select(AccountRow::as_select())
                .first::<AccountRow>(connection)
                .optional()
                .map_err(AccountStoreError::persistence)?;
            Ok(row.map(UserAccount::from))
        })
        .await
    }

    async fn count_with_more_points(&self, points: i64) -> AccountStoreResult<u64> {
        run_blocking(&self.pool, move |connection| {
            let count: i64 = users::table
                .filter(users::points.gt(points))
                .count()
                .get_result(connection)
                .map_err(AccountStoreError::persistence)?;
            Ok(u64::try_from(count).unwrap_or(0))
        })
        .await
    }
}
