//! HTTP surface of the reward backend.
//!
//! Handlers translate JSON requests into engine and service calls and map
//! their outcomes onto status codes. Authentication happens upstream; the
//! caller's identity arrives through an [`IdentityResolver`].

mod dto;
mod error;
mod handlers;
mod identity;
mod state;

pub use dto::{
    CheckInResponse, CompleteTaskRequest, CompleteTaskResponse, CooldownResponse,
    DailyTasksResponse, LeaderboardEntryResponse, LeaderboardQuery, StreakCountResponse,
    StreakResponse, TaskResponse,
};
pub use error::{ApiError, ErrorBody};
pub use handlers::{
    check_in, complete_task, cooldown_status, daily_tasks, health, leaderboard, my_rank, streak,
    streak_count,
};
pub use identity::{
    CurrentUser, DEFAULT_IDENTITY_HEADER, ForwardedUserHeader, IdentityError, IdentityResolver,
};
pub use state::{AppState, SharedLeaderboardService, SharedStreakService, router};

#[cfg(test)]
mod tests;
