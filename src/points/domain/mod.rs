//! Account and ranking types for the leaderboard.

mod account;
mod entry;

pub use account::UserAccount;
pub use entry::{DEFAULT_LEADERBOARD_LIMIT, LeaderboardEntry, MAX_LEADERBOARD_LIMIT, clamp_limit};
