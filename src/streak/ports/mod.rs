//! Port contracts for streak persistence.

pub mod repository;

pub use repository::{StreakRepository, StreakRepositoryError, StreakRepositoryResult};
