//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use rewardpage::{
    calendar::CalendarZone,
    clock::ManualClock,
    daily_task::{
        adapters::memory::{InMemoryDailyTaskStore, InMemoryProgressTracker},
        ports::{DailyTaskStore, ProgressTracker},
        services::{DailyTaskEngine, SharedDailyTaskEngine},
    },
    http::{SharedLeaderboardService, SharedStreakService},
    points::{
        adapters::memory::InMemoryAccountStore,
        domain::UserAccount,
        ports::{LeaderboardRepository, PointsLedger},
        services::LeaderboardService,
    },
    streak::{
        adapters::memory::InMemoryStreakRepository, ports::StreakRepository,
        services::StreakService,
    },
    user::UserId,
};
use rstest::fixture;

/// Parses an RFC 3339 instant.
pub fn at(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("valid RFC 3339 timestamp")
}

/// Every service wired over one set of in-memory stores.
pub struct Backend {
    pub clock: ManualClock,
    pub accounts: Arc<InMemoryAccountStore>,
    pub engine: SharedDailyTaskEngine,
    pub leaderboard: SharedLeaderboardService,
    pub streaks: SharedStreakService,
}

impl Backend {
    /// Registers an account holding `points` and returns its id.
    pub fn register(&self, username: &str, points: i64) -> UserId {
        let user_id = UserId::new();
        self.accounts
            .register(
                UserAccount::new(user_id, username, format!("{username}@example.com"))
                    .with_points(points),
            )
            .expect("register account");
        user_id
    }

    /// Returns the id of `user_id`'s task with the given number.
    pub async fn task_id(&self, user_id: UserId, number: u8) -> String {
        self.engine
            .get_or_create_tasks(user_id)
            .await
            .expect("load tasks")
            .iter()
            .find(|task| task.number().value() == number)
            .map(|task| task.id().to_string())
            .expect("task with that number")
    }
}

/// Provides services over fresh stores with the clock on a Tuesday morning.
#[fixture]
pub fn backend() -> Backend {
    let clock = ManualClock::new(at("2026-03-10T09:00:00Z"));
    let accounts = Arc::new(InMemoryAccountStore::new());

    let ledger: Arc<dyn PointsLedger> = accounts.clone();
    let ranking: Arc<dyn LeaderboardRepository> = accounts.clone();
    let shared_clock: Arc<dyn Clock + Send + Sync> = Arc::new(clock.clone());
    let tasks: Arc<dyn DailyTaskStore> = Arc::new(InMemoryDailyTaskStore::new());
    let progress: Arc<dyn ProgressTracker> = Arc::new(InMemoryProgressTracker::new());
    let streak_repository: Arc<dyn StreakRepository> = Arc::new(InMemoryStreakRepository::new());

    Backend {
        engine: DailyTaskEngine::new(
            tasks,
            progress,
            Arc::clone(&ledger),
            Arc::clone(&shared_clock),
            CalendarZone::utc(),
        ),
        leaderboard: LeaderboardService::new(ranking),
        streaks: StreakService::new(streak_repository, ledger, shared_clock, CalendarZone::utc()),
        clock,
        accounts,
    }
}
