//! In-memory adapters for daily task ports.

mod progress;
mod task_store;

pub use progress::InMemoryProgressTracker;
pub use task_store::InMemoryDailyTaskStore;
