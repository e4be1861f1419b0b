//! Error types for daily task validation and completion gating.

use thiserror::Error;

/// Errors returned while constructing daily task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DailyTaskDomainError {
    /// The task number lies outside `1..=5`.
    #[error("invalid task number {0}, expected a value between 1 and 5")]
    InvalidTaskNumber(i64),

    /// The task identifier is not a well-formed UUID.
    #[error("invalid task id format: '{0}'")]
    InvalidTaskId(String),

    /// A persisted completion count lies outside `0..=5`.
    #[error("invalid completed count {0}, expected a value between 0 and 5")]
    InvalidCompletedCount(i64),
}

/// Business rule that blocks a completion attempt.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CompletionRejection {
    /// Every task of the day has already been completed.
    #[error("all {completed_count} daily tasks already completed")]
    LimitReached {
        /// Completions recorded for the day.
        completed_count: u8,
    },

    /// The previous completion happened less than the cooldown ago.
    #[error("cooldown active, wait {remaining_seconds} seconds")]
    CooldownActive {
        /// Whole seconds (rounded up) until the next completion is accepted.
        remaining_seconds: i64,
    },
}
