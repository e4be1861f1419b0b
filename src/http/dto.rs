//! JSON request and response shapes.

use crate::{
    daily_task::{
        domain::{CooldownStatus, DailyTask},
        services::{CompletionReceipt, DailyTaskOverview},
    },
    points::domain::LeaderboardEntry,
    streak::{
        domain::{CheckInOutcome, WeeklyStreak},
        services::StreakCheckIn,
    },
    user::UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One task of the daily set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task identifier.
    pub id: String,
    /// Position within the set.
    pub number: u8,
    /// Completion flag.
    pub completed: bool,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&DailyTask> for TaskResponse {
    fn from(task: &DailyTask) -> Self {
        Self {
            id: task.id().to_string(),
            number: task.number().value(),
            completed: task.is_completed(),
            completed_at: task.completed_at(),
        }
    }
}

/// Response of `GET /api/tasks/daily`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTasksResponse {
    /// Today's tasks ordered by number.
    pub tasks: Vec<TaskResponse>,
    /// Completions recorded today.
    pub completed_count: u8,
    /// Latest completion.
    pub last_completed_at: Option<DateTime<Utc>>,
    /// Midnight at which the day resets.
    pub next_reset_at: DateTime<Utc>,
    /// End of the latest cooldown.
    pub cooldown_until: Option<DateTime<Utc>>,
}

impl From<&DailyTaskOverview> for DailyTasksResponse {
    fn from(overview: &DailyTaskOverview) -> Self {
        Self {
            tasks: overview.tasks.iter().map(TaskResponse::from).collect(),
            completed_count: overview.progress.completed_count(),
            last_completed_at: overview.progress.last_completed_at(),
            next_reset_at: overview.progress.next_reset_at(),
            cooldown_until: overview.progress.cooldown_end(),
        }
    }
}

/// Body of `POST /api/tasks/complete`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTaskRequest {
    /// Identifier of the task to complete.
    #[serde(default)]
    pub task_id: Option<String>,
}

/// Response of a successful completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTaskResponse {
    /// Always `true`.
    pub success: bool,
    /// The completed task.
    pub task: TaskResponse,
    /// Completions recorded today, including this one.
    pub completed_count: u8,
    /// Midnight at which the day resets.
    pub next_reset_at: DateTime<Utc>,
    /// Instant from which the next completion is accepted.
    pub cooldown_until: DateTime<Utc>,
    /// Points credited for this completion.
    pub points_awarded: i64,
}

impl From<&CompletionReceipt> for CompleteTaskResponse {
    fn from(receipt: &CompletionReceipt) -> Self {
        Self {
            success: true,
            task: TaskResponse::from(&receipt.task),
            completed_count: receipt.completed_count,
            next_reset_at: receipt.next_reset_at,
            cooldown_until: receipt.cooldown_until,
            points_awarded: receipt.points_awarded,
        }
    }
}

/// Response of `GET /api/tasks/cooldown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CooldownResponse {
    /// Whether a completion would be rejected by the cooldown.
    pub is_cooldown_active: bool,
    /// Whole seconds until the cooldown ends.
    pub remaining_seconds: i64,
    /// Latest completion.
    pub last_completed_at: Option<DateTime<Utc>>,
    /// Completions recorded today.
    pub completed_count: u8,
}

impl From<CooldownStatus> for CooldownResponse {
    fn from(status: CooldownStatus) -> Self {
        Self {
            is_cooldown_active: status.is_active,
            remaining_seconds: status.remaining_seconds,
            last_completed_at: status.last_completed_at,
            completed_count: status.completed_count,
        }
    }
}

/// Query string of `GET /api/leaderboard`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LeaderboardQuery {
    /// Requested row count.
    pub limit: Option<i64>,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryResponse {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Point balance.
    pub points: i64,
    /// One-based position.
    pub rank: u64,
}

impl From<LeaderboardEntry> for LeaderboardEntryResponse {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            id: entry.user_id,
            username: entry.username,
            email: entry.email,
            points: entry.points,
            rank: entry.rank,
        }
    }
}

/// Weekly streak as rendered by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[expect(
    clippy::struct_excessive_bools,
    reason = "the client renders one flag per weekday"
)]
pub struct StreakResponse {
    /// Owner of the streak.
    pub user_id: UserId,
    /// Monday.
    pub mon: bool,
    /// Tuesday.
    pub tue: bool,
    /// Wednesday.
    pub wed: bool,
    /// Thursday.
    pub thu: bool,
    /// Friday.
    pub fri: bool,
    /// Saturday.
    pub sat: bool,
    /// Sunday.
    pub sun: bool,
    /// Latest check-in.
    pub last_check_in: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&WeeklyStreak> for StreakResponse {
    fn from(streak: &WeeklyStreak) -> Self {
        let days = streak.days();
        Self {
            user_id: streak.user_id(),
            mon: days.mon,
            tue: days.tue,
            wed: days.wed,
            thu: days.thu,
            fri: days.fri,
            sat: days.sat,
            sun: days.sun,
            last_check_in: streak.last_check_in(),
            updated_at: streak.updated_at(),
        }
    }
}

/// Response of `POST /api/streak/update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
    /// The streak after the check-in.
    pub streak: StreakResponse,
    /// Whether this request marked today.
    pub recorded: bool,
    /// Points credited by this request.
    pub points_awarded: i64,
}

impl From<&StreakCheckIn> for CheckInResponse {
    fn from(check_in: &StreakCheckIn) -> Self {
        Self {
            streak: StreakResponse::from(&check_in.streak),
            recorded: check_in.outcome == CheckInOutcome::Recorded,
            points_awarded: check_in.points_awarded,
        }
    }
}

/// Response of `GET /api/streak/count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakCountResponse {
    /// Days checked in this week.
    pub count: u8,
}
