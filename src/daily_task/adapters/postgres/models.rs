//! Diesel row models for daily task persistence.

use super::schema::{daily_task_progress, daily_tasks};
use crate::{
    daily_task::domain::{
        DAILY_TASK_COUNT, DailyTask, DailyTaskDomainError, DailyTaskId, DailyTaskProgress,
        PersistedDailyTaskData, PersistedProgressData, ProgressId, TaskNumber,
    },
    persistence::PersistenceError,
    user::UserId,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for daily task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = daily_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DailyTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Position within the set.
    pub task_number: i16,
    /// Completion flag.
    pub completed: bool,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Set boundary.
    pub reset_at: DateTime<Utc>,
}

/// Insert model for daily task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = daily_tasks)]
pub struct NewDailyTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Position within the set.
    pub task_number: i16,
    /// Completion flag.
    pub completed: bool,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Set boundary.
    pub reset_at: DateTime<Utc>,
}

impl From<&DailyTask> for NewDailyTaskRow {
    fn from(task: &DailyTask) -> Self {
        Self {
            id: task.id().into_inner(),
            user_id: task.user_id().into_inner(),
            task_number: i16::from(task.number().value()),
            completed: task.is_completed(),
            completed_at: task.completed_at(),
            created_at: task.created_at(),
            reset_at: task.reset_at(),
        }
    }
}

impl TryFrom<DailyTaskRow> for DailyTask {
    type Error = PersistenceError;

    fn try_from(row: DailyTaskRow) -> Result<Self, Self::Error> {
        let number = TaskNumber::new(i64::from(row.task_number))
            .map_err(|err| PersistenceError::CorruptRow(err.to_string()))?;
        Ok(Self::from_persisted(PersistedDailyTaskData {
            id: DailyTaskId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            number,
            completed: row.completed,
            completed_at: row.completed_at,
            created_at: row.created_at,
            reset_at: row.reset_at,
        }))
    }
}

/// Query result row for progress records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = daily_task_progress)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProgressRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Completions recorded for the current day.
    pub completed_count: i16,
    /// Latest completion timestamp.
    pub last_completed_at: Option<DateTime<Utc>>,
    /// End of the latest cooldown.
    pub cooldown_end: Option<DateTime<Utc>>,
    /// Midnight that ends the current day.
    pub next_reset_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for progress records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = daily_task_progress)]
pub struct NewProgressRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Completions recorded for the current day.
    pub completed_count: i16,
    /// Latest completion timestamp.
    pub last_completed_at: Option<DateTime<Utc>>,
    /// End of the latest cooldown.
    pub cooldown_end: Option<DateTime<Utc>>,
    /// Midnight that ends the current day.
    pub next_reset_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&DailyTaskProgress> for NewProgressRow {
    fn from(progress: &DailyTaskProgress) -> Self {
        Self {
            id: progress.id().into_inner(),
            user_id: progress.user_id().into_inner(),
            completed_count: i16::from(progress.completed_count()),
            last_completed_at: progress.last_completed_at(),
            cooldown_end: progress.cooldown_end(),
            next_reset_at: progress.next_reset_at(),
            created_at: progress.created_at(),
            updated_at: progress.updated_at(),
        }
    }
}

impl TryFrom<ProgressRow> for DailyTaskProgress {
    type Error = PersistenceError;

    fn try_from(row: ProgressRow) -> Result<Self, Self::Error> {
        let completed_count = u8::try_from(row.completed_count)
            .ok()
            .filter(|count| *count <= DAILY_TASK_COUNT)
            .ok_or(DailyTaskDomainError::InvalidCompletedCount(i64::from(
                row.completed_count,
            )))
            .map_err(|err| PersistenceError::CorruptRow(err.to_string()))?;
        Ok(Self::from_persisted(PersistedProgressData {
            id: ProgressId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            completed_count,
            last_completed_at: row.last_completed_at,
            cooldown_end: row.cooldown_end,
            next_reset_at: row.next_reset_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}
