//! Daily task record.

use super::{DailyTaskId, TaskNumber};
use crate::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One slot of a user's daily checklist.
///
/// A set of five tasks shares the same `reset_at`: the midnight that ends the
/// day the set belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTask {
    id: DailyTaskId,
    user_id: UserId,
    number: TaskNumber,
    completed: bool,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    reset_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted daily task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDailyTaskData {
    /// Persisted task identifier.
    pub id: DailyTaskId,
    /// Owner of the task.
    pub user_id: UserId,
    /// Position within the set.
    pub number: TaskNumber,
    /// Whether the task has been completed.
    pub completed: bool,
    /// Completion timestamp, if completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Day boundary the set belongs to.
    pub reset_at: DateTime<Utc>,
}

impl DailyTask {
    /// Builds a fresh, uncompleted set of tasks numbered `1..=5`.
    #[must_use]
    pub fn fresh_set(user_id: UserId, reset_at: DateTime<Utc>, now: DateTime<Utc>) -> Vec<Self> {
        TaskNumber::all()
            .map(|number| Self {
                id: DailyTaskId::new(),
                user_id,
                number,
                completed: false,
                completed_at: None,
                created_at: now,
                reset_at,
            })
            .collect()
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedDailyTaskData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            number: data.number,
            completed: data.completed,
            completed_at: data.completed_at,
            created_at: data.created_at,
            reset_at: data.reset_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> DailyTaskId {
        self.id
    }

    /// Returns the owner of the task.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the position within the set.
    #[must_use]
    pub const fn number(&self) -> TaskNumber {
        self.number
    }

    /// Returns whether the task has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the day boundary of the set this task belongs to.
    #[must_use]
    pub const fn reset_at(&self) -> DateTime<Utc> {
        self.reset_at
    }

    /// Marks the task completed at `completed_at`.
    pub const fn mark_completed(&mut self, completed_at: DateTime<Utc>) {
        self.completed = true;
        self.completed_at = Some(completed_at);
    }
}
