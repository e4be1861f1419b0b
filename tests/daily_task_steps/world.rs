//! Shared world state for daily task BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rewardpage::{
    calendar::CalendarZone,
    clock::ManualClock,
    daily_task::{
        adapters::memory::{InMemoryDailyTaskStore, InMemoryProgressTracker},
        domain::DailyTask,
        services::{CompletionReceipt, DailyTaskEngine, DailyTaskError},
    },
    points::{adapters::memory::InMemoryAccountStore, domain::UserAccount},
    user::UserId,
};
use rstest::fixture;

/// Engine type used by the BDD world.
pub type TestEngine = DailyTaskEngine<
    InMemoryDailyTaskStore,
    InMemoryProgressTracker,
    InMemoryAccountStore,
    ManualClock,
>;

/// Scenario world for daily task behaviour tests.
pub struct DailyTaskWorld {
    pub clock: ManualClock,
    pub tasks: Arc<InMemoryDailyTaskStore>,
    pub accounts: Arc<InMemoryAccountStore>,
    pub engine: TestEngine,
    pub user_id: Option<UserId>,
    pub earlier_tasks: Vec<DailyTask>,
    pub returned_tasks: Vec<DailyTask>,
    pub last_completion: Option<Result<CompletionReceipt, DailyTaskError>>,
}

impl DailyTaskWorld {
    /// Creates a world frozen at the Unix epoch with empty stores.
    #[must_use]
    pub fn new() -> Self {
        let clock = ManualClock::new(DateTime::<Utc>::UNIX_EPOCH);
        let tasks = Arc::new(InMemoryDailyTaskStore::new());
        let accounts = Arc::new(InMemoryAccountStore::new());
        let engine = DailyTaskEngine::new(
            Arc::clone(&tasks),
            Arc::new(InMemoryProgressTracker::new()),
            Arc::clone(&accounts),
            Arc::new(clock.clone()),
            CalendarZone::utc(),
        );

        Self {
            clock,
            tasks,
            accounts,
            engine,
            user_id: None,
            earlier_tasks: Vec::new(),
            returned_tasks: Vec::new(),
            last_completion: None,
        }
    }

    /// Returns the scenario user.
    pub fn user(&self) -> Result<UserId, eyre::Report> {
        self.user_id
            .ok_or_else(|| eyre::eyre!("missing user in scenario world"))
    }

    /// Registers a fresh account and makes it the scenario user.
    pub fn register_user(&mut self) -> Result<UserId, eyre::Report> {
        let user_id = UserId::new();
        self.accounts
            .register(UserAccount::new(user_id, "scenario", "scenario@example.com"))
            .map_err(|err| eyre::eyre!("register scenario account: {err}"))?;
        self.user_id = Some(user_id);
        Ok(user_id)
    }

    /// Returns the id of today's task with the given number.
    pub fn task_id(&self, number: u8) -> Result<String, eyre::Report> {
        let user_id = self.user()?;
        let tasks = run_async(self.engine.get_or_create_tasks(user_id))
            .map_err(|err| eyre::eyre!("load tasks: {err}"))?;
        tasks
            .iter()
            .find(|task| task.number().value() == number)
            .map(|task| task.id().to_string())
            .ok_or_else(|| eyre::eyre!("no task numbered {number}"))
    }
}

impl Default for DailyTaskWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DailyTaskWorld {
    DailyTaskWorld::default()
}

/// Parses an RFC 3339 instant from a step argument.
pub fn instant(raw: &str) -> Result<DateTime<Utc>, eyre::Report> {
    raw.parse()
        .map_err(|err| eyre::eyre!("invalid timestamp {raw:?} in scenario: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
