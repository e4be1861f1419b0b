//! `PostgreSQL` adapters for daily task persistence.

mod models;
mod progress;
mod schema;
mod task_store;

use crate::{
    daily_task::ports::{DailyTaskStoreError, ProgressTrackerError},
    persistence::PersistenceError,
};

pub use progress::PostgresProgressTracker;
pub use task_store::PostgresDailyTaskStore;

impl From<PersistenceError> for DailyTaskStoreError {
    fn from(err: PersistenceError) -> Self {
        Self::persistence(err)
    }
}

impl From<PersistenceError> for ProgressTrackerError {
    fn from(err: PersistenceError) -> Self {
        Self::persistence(err)
    }
}
