//! Service layer for ranking accounts.

mod leaderboard;

pub use leaderboard::{LeaderboardError, LeaderboardResult, LeaderboardService};
