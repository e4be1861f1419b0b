//! Thread-safe account map serving both the ledger and the leaderboard.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{
    points::{
        domain::UserAccount,
        ports::{AccountStoreError, AccountStoreResult, LeaderboardRepository, PointsLedger},
    },
    user::UserId,
};

/// In-memory account store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<UserId, UserAccount>>>,
}

impl InMemoryAccountStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountStoreError::Persistence`] when the lock is poisoned.
    pub fn register(&self, account: UserAccount) -> AccountStoreResult<()> {
        let mut accounts = self.accounts.write().map_err(lock_error)?;
        accounts.insert(account.id(), account);
        Ok(())
    }

    /// Returns the current balance of `user_id`, if registered.
    ///
    /// # Errors
    ///
    /// Returns [`AccountStoreError::Persistence`] when the lock is poisoned.
    pub fn points_of(&self, user_id: UserId) -> AccountStoreResult<Option<i64>> {
        let accounts = self.accounts.read().map_err(lock_error)?;
        Ok(accounts.get(&user_id).map(UserAccount::points))
    }
}

fn lock_error(err: impl std::fmt::Display) -> AccountStoreError {
    AccountStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl PointsLedger for InMemoryAccountStore {
    async fn add_points(&self, user_id: UserId, delta: i64) -> AccountStoreResult<()> {
        let mut accounts = self.accounts.write().map_err(lock_error)?;
        let account = accounts
            .get_mut(&user_id)
            .ok_or(AccountStoreError::UserNotFound(user_id))?;
        account.add_points(delta);
        Ok(())
    }
}

#[async_trait]
impl LeaderboardRepository for InMemoryAccountStore {
    async fn top_by_points(&self, limit: usize) -> AccountStoreResult<Vec<UserAccount>> {
        let accounts = self.accounts.read().map_err(lock_error)?;
        let mut ranked: Vec<UserAccount> = accounts.values().cloned().collect();
        ranked.sort_by(|left, right| {
            right
                .points()
                .cmp(&left.points())
                .then_with(|| left.username().cmp(right.username()))
        });
        ranked.truncate(limit);
        Ok(ranked)
    }

    async fn find_account(&self, user_id: UserId) -> AccountStoreResult<Option<UserAccount>> {
        let accounts = self.accounts.read().map_err(lock_error)?;
        Ok(accounts.get(&user_id).cloned())
    }

    async fn count_with_more_points(&self, points: i64) -> AccountStoreResult<u64> {
        let accounts = self.accounts.read().map_err(lock_error)?;
        let count = accounts
            .values()
            .filter(|account| account.points() > points)
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }
}
