//! Domain model for the daily task checklist.
//!
//! A user owns one set of [`DAILY_TASK_COUNT`] tasks per calendar day and a
//! single progress record that gates completions behind a fixed cooldown.
//! The types here hold no infrastructure concerns; the engine in
//! [`crate::daily_task::services`] sequences them against the ports.

mod error;
mod ids;
mod policy;
mod progress;
mod task;

pub use error::{CompletionRejection, DailyTaskDomainError};
pub use ids::{DailyTaskId, ProgressId, TaskNumber};
pub use policy::{COOLDOWN_SECONDS, DAILY_TASK_COUNT, POINTS_PER_TASK, cooldown};
pub use progress::{CompletionRecord, CooldownStatus, DailyTaskProgress, PersistedProgressData};
pub use task::{DailyTask, PersistedDailyTaskData};
