//! Shared handler state and route table.

use super::{
    IdentityResolver,
    handlers::{
        check_in, complete_task, cooldown_status, daily_tasks, health, leaderboard, my_rank,
        streak, streak_count,
    },
};
use crate::{
    daily_task::services::SharedDailyTaskEngine,
    points::{ports::LeaderboardRepository, ports::PointsLedger, services::LeaderboardService},
    streak::{ports::StreakRepository, services::StreakService},
};
use axum::Router;
use axum::routing::{get, post};
use mockable::Clock;
use std::sync::Arc;

/// Leaderboard service over trait objects.
pub type SharedLeaderboardService = LeaderboardService<dyn LeaderboardRepository>;

/// Streak service over trait objects.
pub type SharedStreakService =
    StreakService<dyn StreakRepository, dyn PointsLedger, dyn Clock + Send + Sync>;

/// Services reachable from every handler.
#[derive(Clone)]
pub struct AppState {
    daily_tasks: Arc<SharedDailyTaskEngine>,
    leaderboard: Arc<SharedLeaderboardService>,
    streaks: Arc<SharedStreakService>,
    identity: Arc<dyn IdentityResolver>,
}

impl AppState {
    /// Bundles the services behind the HTTP surface.
    #[must_use]
    pub fn new(
        daily_tasks: Arc<SharedDailyTaskEngine>,
        leaderboard: Arc<SharedLeaderboardService>,
        streaks: Arc<SharedStreakService>,
        identity: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            daily_tasks,
            leaderboard,
            streaks,
            identity,
        }
    }

    /// Returns the daily task engine.
    #[must_use]
    pub fn daily_tasks(&self) -> &SharedDailyTaskEngine {
        &self.daily_tasks
    }

    /// Returns the leaderboard service.
    #[must_use]
    pub fn leaderboard(&self) -> &SharedLeaderboardService {
        &self.leaderboard
    }

    /// Returns the streak service.
    #[must_use]
    pub fn streaks(&self) -> &SharedStreakService {
        &self.streaks
    }

    /// Returns the identity resolver.
    #[must_use]
    pub fn identity(&self) -> &dyn IdentityResolver {
        self.identity.as_ref()
    }
}

/// Builds the route table.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/tasks/daily", get(daily_tasks))
        .route("/api/tasks/complete", post(complete_task))
        .route("/api/tasks/cooldown", get(cooldown_status))
        .route("/api/leaderboard", get(leaderboard))
        .route("/api/leaderboard/me", get(my_rank))
        .route("/api/streak", get(streak))
        .route("/api/streak/update", post(check_in))
        .route("/api/streak/count", get(streak_count))
        .with_state(state)
}
