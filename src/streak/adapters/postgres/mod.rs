//! `PostgreSQL` adapter for weekly streaks.

mod models;
mod repository;
mod schema;

use crate::{persistence::PersistenceError, streak::ports::StreakRepositoryError};

pub use repository::PostgresStreakRepository;

impl From<PersistenceError> for StreakRepositoryError {
    fn from(err: PersistenceError) -> Self {
        Self::persistence(err)
    }
}
