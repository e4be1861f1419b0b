//! Read-side port for ranking accounts.

use super::AccountStoreResult;
use crate::{points::domain::UserAccount, user::UserId};
use async_trait::async_trait;

/// Ranking queries over user accounts.
#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// Returns up to `limit` accounts ordered by points descending, then
    /// username ascending.
    async fn top_by_points(&self, limit: usize) -> AccountStoreResult<Vec<UserAccount>>;

    /// Finds an account by identifier.
    async fn find_account(&self, user_id: UserId) -> AccountStoreResult<Option<UserAccount>>;

    /// Counts accounts holding strictly more than `points`.
    async fn count_with_more_points(&self, points: i64) -> AccountStoreResult<u64>;
}
