//! Daily task engine: lazy day reset, set provisioning and gated completion.

use super::{CompletionReceipt, DailyTaskOverview};
use crate::{
    calendar::CalendarZone,
    daily_task::{
        domain::{
            CompletionRecord, CompletionRejection, CooldownStatus, DailyTask,
            DailyTaskDomainError, DailyTaskId, DailyTaskProgress, POINTS_PER_TASK,
        },
        ports::{DailyTaskStore, DailyTaskStoreError, ProgressTracker, ProgressTrackerError},
    },
    persistence::{DEFAULT_STORE_TIMEOUT, DeadlineElapsed, with_deadline},
    points::ports::{AccountStoreError, PointsLedger},
    user::UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::convert::identity;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Service-level errors for daily task operations.
#[derive(Debug, Error)]
pub enum DailyTaskError {
    /// Client input failed validation.
    #[error(transparent)]
    Domain(#[from] DailyTaskDomainError),
    /// The limit or cooldown rule blocked the completion.
    #[error(transparent)]
    Rejected(#[from] CompletionRejection),
    /// The task does not exist, belongs to another user or to another day.
    #[error("daily task not found: {0}")]
    TaskNotFound(DailyTaskId),
    /// The task was completed before.
    #[error("daily task already completed: {0}")]
    TaskAlreadyCompleted(DailyTaskId),
    /// Task store operation failed.
    #[error(transparent)]
    TaskStore(DailyTaskStoreError),
    /// Progress tracker operation failed.
    #[error(transparent)]
    Progress(#[from] ProgressTrackerError),
    /// A datastore call exceeded its deadline.
    #[error(transparent)]
    Timeout(#[from] DeadlineElapsed),
}

impl DailyTaskError {
    /// Returns whether the error is an infrastructure failure rather than a
    /// business outcome the caller can act on.
    #[must_use]
    pub const fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Self::TaskStore(_) | Self::Progress(_) | Self::Timeout(_)
        )
    }
}

impl From<DailyTaskStoreError> for DailyTaskError {
    fn from(err: DailyTaskStoreError) -> Self {
        match err {
            DailyTaskStoreError::NotFound(id) => Self::TaskNotFound(id),
            DailyTaskStoreError::AlreadyCompleted(id) => Self::TaskAlreadyCompleted(id),
            other @ DailyTaskStoreError::Persistence(_) => Self::TaskStore(other),
        }
    }
}

/// Result type for daily task engine operations.
pub type DailyTaskResult<T> = Result<T, DailyTaskError>;

/// Engine over trait objects, as shared by the HTTP layer.
pub type SharedDailyTaskEngine = DailyTaskEngine<
    dyn DailyTaskStore,
    dyn ProgressTracker,
    dyn PointsLedger,
    dyn Clock + Send + Sync,
>;

/// Orchestrates the per-user daily task state machine.
///
/// Every public operation samples the clock once and threads that instant
/// through all of its steps. Day rollover happens lazily: the first
/// operation after the stored boundary purges the stale set, provisions a
/// fresh one and zeroes the progress record.
pub struct DailyTaskEngine<S, P, L, C>
where
    S: DailyTaskStore + ?Sized,
    P: ProgressTracker + ?Sized,
    L: PointsLedger + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    tasks: Arc<S>,
    progress: Arc<P>,
    ledger: Arc<L>,
    clock: Arc<C>,
    zone: CalendarZone,
    store_timeout: Duration,
}

impl<S, P, L, C> Clone for DailyTaskEngine<S, P, L, C>
where
    S: DailyTaskStore + ?Sized,
    P: ProgressTracker + ?Sized,
    L: PointsLedger + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            progress: Arc::clone(&self.progress),
            ledger: Arc::clone(&self.ledger),
            clock: Arc::clone(&self.clock),
            zone: self.zone,
            store_timeout: self.store_timeout,
        }
    }
}

impl<S, P, L, C> DailyTaskEngine<S, P, L, C>
where
    S: DailyTaskStore + ?Sized,
    P: ProgressTracker + ?Sized,
    L: PointsLedger + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    /// Creates an engine with the default datastore deadline.
    #[must_use]
    pub const fn new(
        tasks: Arc<S>,
        progress: Arc<P>,
        ledger: Arc<L>,
        clock: Arc<C>,
        zone: CalendarZone,
    ) -> Self {
        Self {
            tasks,
            progress,
            ledger,
            clock,
            zone,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Overrides the deadline applied to each store and ledger call.
    #[must_use]
    pub const fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Resets the user's state when the stored day has ended.
    ///
    /// Calling it again within the same day is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DailyTaskError`] when a store call fails or times out.
    pub async fn ensure_current_day(&self, user_id: UserId) -> DailyTaskResult<DailyTaskProgress> {
        let now = self.clock.utc();
        self.reconcile(user_id, now)
            .await
            .inspect_err(|err| log_failure("ensure_current_day", user_id, None, err))
    }

    /// Returns today's five tasks, provisioning them on the first visit of
    /// the day.
    ///
    /// # Errors
    ///
    /// Returns [`DailyTaskError`] when a store call fails or times out.
    pub async fn get_or_create_tasks(&self, user_id: UserId) -> DailyTaskResult<Vec<DailyTask>> {
        let now = self.clock.utc();
        let result = async {
            let progress = self.reconcile(user_id, now).await?;
            self.current_set(user_id, &progress, now).await
        }
        .await;
        result.inspect_err(|err| log_failure("get_or_create_tasks", user_id, None, err))
    }

    /// Returns today's tasks and progress as seen at one instant.
    ///
    /// # Errors
    ///
    /// Returns [`DailyTaskError`] when a store call fails or times out.
    pub async fn daily_overview(&self, user_id: UserId) -> DailyTaskResult<DailyTaskOverview> {
        let now = self.clock.utc();
        let result = async {
            let progress = self.reconcile(user_id, now).await?;
            let tasks = self.current_set(user_id, &progress, now).await?;
            Ok::<_, DailyTaskError>(DailyTaskOverview { tasks, progress })
        }
        .await;
        result.inspect_err(|err| log_failure("daily_overview", user_id, None, err))
    }

    /// Reports the cooldown state after day reconciliation.
    ///
    /// # Errors
    ///
    /// Returns [`DailyTaskError`] when a store call fails or times out.
    pub async fn cooldown_status(&self, user_id: UserId) -> DailyTaskResult<CooldownStatus> {
        let now = self.clock.utc();
        self.reconcile(user_id, now)
            .await
            .map(|progress| progress.cooldown_status(now))
            .inspect_err(|err| log_failure("cooldown_status", user_id, None, err))
    }

    /// Completes one of today's tasks and credits the award.
    ///
    /// Checks run in a fixed order and the first failure wins: day reset,
    /// daily limit, cooldown, task id format, task lookup. The completion
    /// slot is then claimed on the progress record before the task is
    /// marked, so two racing requests cannot both consume it; a failed mark
    /// gives the slot back. A ledger
    /// failure never fails the completion; it is logged and reported as
    /// zero points awarded.
    ///
    /// # Errors
    ///
    /// Returns [`DailyTaskError::Rejected`] for limit or cooldown
    /// violations, [`DailyTaskError::Domain`] for a malformed id,
    /// [`DailyTaskError::TaskNotFound`] or
    /// [`DailyTaskError::TaskAlreadyCompleted`] for an unusable task, and a
    /// store failure variant when persistence fails or times out.
    pub async fn complete_task(
        &self,
        user_id: UserId,
        raw_task_id: &str,
    ) -> DailyTaskResult<CompletionReceipt> {
        let now = self.clock.utc();
        self.complete_at(user_id, raw_task_id, now)
            .await
            .inspect_err(|err| log_failure("complete_task", user_id, Some(raw_task_id), err))
    }

    async fn complete_at(
        &self,
        user_id: UserId,
        raw_task_id: &str,
        now: DateTime<Utc>,
    ) -> DailyTaskResult<CompletionReceipt> {
        let progress = self.reconcile(user_id, now).await?;
        progress.check_completion(now)?;

        let task_id = DailyTaskId::parse(raw_task_id)?;
        let task = self
            .call("find_by_id", self.tasks.find_by_id(task_id))
            .await?
            .filter(|found| {
                found.user_id() == user_id && found.reset_at() == progress.next_reset_at()
            })
            .ok_or(DailyTaskError::TaskNotFound(task_id))?;
        if task.is_completed() {
            return Err(DailyTaskError::TaskAlreadyCompleted(task_id));
        }

        let (record, previous) = self.claim_slot(user_id, &progress, now).await?;
        let completed = match self
            .call("mark_completed", self.tasks.mark_completed(task_id, now))
            .await
        {
            Ok(completed) => completed,
            Err(err) => {
                self.release_slot(user_id, &record, &previous).await;
                return Err(err);
            }
        };
        let points_awarded = self.award_points(user_id, task_id).await;

        info!(
            user_id = %user_id,
            task_id = %task_id,
            completed_count = record.completed_count,
            points_awarded,
            "daily task completed"
        );
        Ok(CompletionReceipt {
            task: completed,
            completed_count: record.completed_count,
            next_reset_at: record.next_reset_at,
            cooldown_until: record.cooldown_end,
            points_awarded,
        })
    }

    /// Writes the completion to the progress record.
    ///
    /// A lost conditional write re-reads the record once and re-applies the
    /// limit and cooldown rules against the winner's state. Returns the
    /// written record together with the state it replaced.
    async fn claim_slot(
        &self,
        user_id: UserId,
        observed: &DailyTaskProgress,
        now: DateTime<Utc>,
    ) -> DailyTaskResult<(CompletionRecord, DailyTaskProgress)> {
        let record = observed.completion_at(now);
        match self
            .call(
                "record_completion",
                self.progress
                    .record_completion(user_id, observed.completed_count(), &record),
            )
            .await
        {
            Ok(()) => return Ok((record, observed.clone())),
            Err(DailyTaskError::Progress(ProgressTrackerError::Conflict(_))) => {
                debug!(user_id = %user_id, "progress changed concurrently, re-checking");
            }
            Err(err) => return Err(err),
        }

        let current = self
            .call(
                "get_or_create",
                self.progress
                    .get_or_create(user_id, self.zone.next_midnight(now), now),
            )
            .await?;
        current.check_completion(now)?;
        let retry = current.completion_at(now);
        self.call(
            "record_completion",
            self.progress
                .record_completion(user_id, current.completed_count(), &retry),
        )
        .await?;
        Ok((retry, current))
    }

    /// Gives back a claimed slot whose task could not be marked.
    async fn release_slot(
        &self,
        user_id: UserId,
        claimed: &CompletionRecord,
        previous: &DailyTaskProgress,
    ) {
        match self
            .call(
                "release_completion",
                self.progress.release_completion(user_id, claimed, previous),
            )
            .await
        {
            Ok(true) => debug!(user_id = %user_id, "completion slot released"),
            Ok(false) => warn!(
                user_id = %user_id,
                "progress moved on before the completion slot could be released"
            ),
            Err(err) => error!(
                user_id = %user_id,
                error = %err,
                "failed to release completion slot"
            ),
        }
    }

    async fn award_points(&self, user_id: UserId, task_id: DailyTaskId) -> i64 {
        let outcome = with_deadline(
            "add_points",
            self.store_timeout,
            self.ledger.add_points(user_id, POINTS_PER_TASK),
        )
        .await
        .map_err(AccountStoreError::persistence)
        .and_then(identity);

        match outcome {
            Ok(()) => POINTS_PER_TASK,
            Err(err) => {
                warn!(
                    user_id = %user_id,
                    task_id = %task_id,
                    error = %err,
                    "point award failed, completion kept"
                );
                0
            }
        }
    }

    /// Loads the progress record and performs the lazy day reset.
    async fn reconcile(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DailyTaskResult<DailyTaskProgress> {
        let window = self.zone.window(now);
        let mut progress = self
            .call(
                "get_or_create",
                self.progress.get_or_create(user_id, window.end, now),
            )
            .await?;
        if !progress.needs_reset(now) {
            return Ok(progress);
        }

        let purged = self
            .call(
                "delete_older_than",
                self.tasks.delete_older_than(user_id, window.end),
            )
            .await?;
        self.call(
            "create_five",
            self.tasks.create_five(user_id, window.end, now),
        )
        .await?;
        let performed = self
            .call(
                "reset_for_new_day",
                self.progress.reset_for_new_day(
                    user_id,
                    progress.next_reset_at(),
                    window.end,
                    now,
                ),
            )
            .await?;

        if performed {
            info!(
                user_id = %user_id,
                previous_reset_at = %progress.next_reset_at(),
                next_reset_at = %window.end,
                purged,
                "daily tasks reset"
            );
            progress.apply_reset(window.end, now);
            return Ok(progress);
        }
        self.call(
            "get_or_create",
            self.progress.get_or_create(user_id, window.end, now),
        )
        .await
    }

    /// Returns the set belonging to `progress`'s day, creating it when none
    /// exists yet.
    async fn current_set(
        &self,
        user_id: UserId,
        progress: &DailyTaskProgress,
        now: DateTime<Utc>,
    ) -> DailyTaskResult<Vec<DailyTask>> {
        let window = self.zone.day_ending_at(progress.next_reset_at());
        let existing = self
            .call("find_for_day", self.tasks.find_for_day(user_id, window))
            .await?;
        if !existing.is_empty() {
            return Ok(existing);
        }
        self.call(
            "create_five",
            self.tasks.create_five(user_id, window.end, now),
        )
        .await
    }

    async fn call<T, E, F>(&self, operation: &'static str, future: F) -> DailyTaskResult<T>
    where
        F: Future<Output = Result<T, E>>,
        DailyTaskError: From<E>,
    {
        Ok(with_deadline(operation, self.store_timeout, future).await??)
    }
}

fn log_failure(operation: &str, user_id: UserId, task_id: Option<&str>, err: &DailyTaskError) {
    if err.is_store_failure() {
        error!(
            operation,
            user_id = %user_id,
            task_id = task_id.unwrap_or_default(),
            error = %err,
            "daily task store failure"
        );
    } else {
        debug!(operation, user_id = %user_id, error = %err, "daily task request rejected");
    }
}
