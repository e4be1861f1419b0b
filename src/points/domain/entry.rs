//! Ranked leaderboard rows and limit rules.

use super::UserAccount;
use crate::user::UserId;
use serde::{Deserialize, Serialize};

/// Number of rows returned when the caller gives no usable limit.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Upper bound on the rows returned by one leaderboard query.
pub const MAX_LEADERBOARD_LIMIT: usize = 100;

/// One ranked row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Ranked user.
    pub user_id: UserId,
    /// Display name.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Point balance.
    pub points: i64,
    /// One-based position.
    pub rank: u64,
}

impl LeaderboardEntry {
    /// Builds a row for `account` at `rank`.
    #[must_use]
    pub fn ranked(account: &UserAccount, rank: u64) -> Self {
        Self {
            user_id: account.id(),
            username: account.username().to_owned(),
            email: account.email().to_owned(),
            points: account.points(),
            rank,
        }
    }
}

/// Normalizes a requested row count.
///
/// Missing, zero and negative values fall back to
/// [`DEFAULT_LEADERBOARD_LIMIT`]; larger values are capped at
/// [`MAX_LEADERBOARD_LIMIT`].
#[must_use]
pub fn clamp_limit(requested: Option<i64>) -> usize {
    match requested {
        Some(value) if value > 0 => usize::try_from(value)
            .unwrap_or(MAX_LEADERBOARD_LIMIT)
            .min(MAX_LEADERBOARD_LIMIT),
        _ => DEFAULT_LEADERBOARD_LIMIT,
    }
}
