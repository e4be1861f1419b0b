//! Port contracts for daily task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the engine.

pub mod progress;
pub mod task_store;

pub use progress::{ProgressTracker, ProgressTrackerError, ProgressTrackerResult};
pub use task_store::{DailyTaskStore, DailyTaskStoreError, DailyTaskStoreResult};
