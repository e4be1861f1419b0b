//! Fixed limits of the daily checklist.

use chrono::TimeDelta;

/// Number of tasks in each user's daily set.
pub const DAILY_TASK_COUNT: u8 = 5;

/// Seconds that must elapse between two completions.
pub const COOLDOWN_SECONDS: i64 = 300;

/// Points credited to the user for each completed task.
pub const POINTS_PER_TASK: i64 = 20;

/// Returns the cooldown interval as a duration.
#[must_use]
pub fn cooldown() -> TimeDelta {
    TimeDelta::seconds(COOLDOWN_SECONDS)
}
