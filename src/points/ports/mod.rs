//! Port contracts for account points and ranking.

pub mod ledger;
pub mod leaderboard;

pub use leaderboard::LeaderboardRepository;
pub use ledger::{AccountStoreError, AccountStoreResult, PointsLedger};
