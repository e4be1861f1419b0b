//! Service layer orchestrating the daily task state machine.

mod engine;
mod outcome;

pub use engine::{DailyTaskEngine, DailyTaskError, DailyTaskResult, SharedDailyTaskEngine};
pub use outcome::{CompletionReceipt, DailyTaskOverview};
