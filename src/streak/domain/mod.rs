//! Streak domain types.

mod streak;
mod week;

pub use streak::{CHECK_IN_POINTS, CheckInOutcome, PersistedStreakData, StreakId, WeeklyStreak};
pub use week::WeekDays;
