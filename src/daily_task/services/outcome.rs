//! Values returned by the daily task engine.

use crate::daily_task::domain::{DailyTask, DailyTaskProgress};
use chrono::{DateTime, Utc};

/// Today's task set together with the progress record that gates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTaskOverview {
    /// Today's five tasks, ordered by task number.
    pub tasks: Vec<DailyTask>,
    /// The user's progress after day reconciliation.
    pub progress: DailyTaskProgress,
}

/// Result of a successful completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReceipt {
    /// The task as stored after completion.
    pub task: DailyTask,
    /// Completions recorded for the day, including this one.
    pub completed_count: u8,
    /// Midnight at which the day's state resets.
    pub next_reset_at: DateTime<Utc>,
    /// Instant from which the next completion is accepted.
    pub cooldown_until: DateTime<Utc>,
    /// Points credited for this completion; zero when the ledger failed.
    pub points_awarded: i64,
}
