//! Per-user progress record gating daily completions.

use super::{CompletionRejection, DAILY_TASK_COUNT, ProgressId, cooldown};
use crate::{calendar::is_past_boundary, user::UserId};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate completion state for one user's current day.
///
/// The record is the source of truth for gating: the completion count and
/// the cooldown are read from here, never recomputed from the task set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTaskProgress {
    id: ProgressId,
    user_id: UserId,
    completed_count: u8,
    last_completed_at: Option<DateTime<Utc>>,
    cooldown_end: Option<DateTime<Utc>>,
    next_reset_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted progress record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProgressData {
    /// Persisted record identifier.
    pub id: ProgressId,
    /// Owner of the record.
    pub user_id: UserId,
    /// Completions recorded for the current day.
    pub completed_count: u8,
    /// Timestamp of the latest completion.
    pub last_completed_at: Option<DateTime<Utc>>,
    /// End of the cooldown started by the latest completion.
    pub cooldown_end: Option<DateTime<Utc>>,
    /// Midnight at which the current day ends.
    pub next_reset_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Field values written by a successful completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionRecord {
    /// Instant of the completion.
    pub completed_at: DateTime<Utc>,
    /// Completion count after this completion.
    pub completed_count: u8,
    /// End of the cooldown started by this completion.
    pub cooldown_end: DateTime<Utc>,
    /// Boundary of the day the completion belongs to.
    pub next_reset_at: DateTime<Utc>,
}

/// Snapshot of the cooldown as seen by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownStatus {
    /// Whether a completion would currently be rejected by the cooldown.
    pub is_active: bool,
    /// Whole seconds (rounded up) until the cooldown ends; zero when idle.
    pub remaining_seconds: i64,
    /// Timestamp of the latest completion.
    pub last_completed_at: Option<DateTime<Utc>>,
    /// Completions recorded for the current day.
    pub completed_count: u8,
}

impl DailyTaskProgress {
    /// Creates an empty progress record for a user's first visit.
    #[must_use]
    pub fn new(user_id: UserId, next_reset_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            id: ProgressId::new(),
            user_id,
            completed_count: 0,
            last_completed_at: None,
            cooldown_end: None,
            next_reset_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a progress record from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedProgressData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            completed_count: data.completed_count,
            last_completed_at: data.last_completed_at,
            cooldown_end: data.cooldown_end,
            next_reset_at: data.next_reset_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> ProgressId {
        self.id
    }

    /// Returns the owner of the record.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the completions recorded for the current day.
    #[must_use]
    pub const fn completed_count(&self) -> u8 {
        self.completed_count
    }

    /// Returns the timestamp of the latest completion.
    #[must_use]
    pub const fn last_completed_at(&self) -> Option<DateTime<Utc>> {
        self.last_completed_at
    }

    /// Returns the end of the current cooldown, if one was started today.
    #[must_use]
    pub const fn cooldown_end(&self) -> Option<DateTime<Utc>> {
        self.cooldown_end
    }

    /// Returns the midnight at which the current day ends.
    #[must_use]
    pub const fn next_reset_at(&self) -> DateTime<Utc> {
        self.next_reset_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the day this record describes has ended.
    #[must_use]
    pub fn needs_reset(&self, now: DateTime<Utc>) -> bool {
        is_past_boundary(self.next_reset_at, now)
    }

    /// Returns whether every task of the day has been completed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.completed_count >= DAILY_TASK_COUNT
    }

    /// Returns the time left before another completion is accepted.
    ///
    /// The result never exceeds the cooldown itself, even when the stored
    /// completion lies in the future relative to `now`.
    #[must_use]
    pub fn cooldown_remaining(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        let last = self.last_completed_at?;
        let remaining = cooldown() - (now - last);
        (remaining > TimeDelta::zero()).then(|| remaining.min(cooldown()))
    }

    /// Applies the limit and cooldown rules, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionRejection::LimitReached`] when all tasks are done
    /// and [`CompletionRejection::CooldownActive`] when the previous
    /// completion is more recent than the cooldown.
    pub fn check_completion(&self, now: DateTime<Utc>) -> Result<(), CompletionRejection> {
        if self.is_complete() {
            return Err(CompletionRejection::LimitReached {
                completed_count: self.completed_count,
            });
        }
        if let Some(remaining) = self.cooldown_remaining(now) {
            return Err(CompletionRejection::CooldownActive {
                remaining_seconds: ceil_seconds(remaining),
            });
        }
        Ok(())
    }

    /// Returns the field values a completion at `now` writes.
    #[must_use]
    pub fn completion_at(&self, now: DateTime<Utc>) -> CompletionRecord {
        CompletionRecord {
            completed_at: now,
            completed_count: self.completed_count.saturating_add(1),
            cooldown_end: now + cooldown(),
            next_reset_at: self.next_reset_at,
        }
    }

    /// Reports the cooldown state at `now`.
    #[must_use]
    pub fn cooldown_status(&self, now: DateTime<Utc>) -> CooldownStatus {
        let remaining = self.cooldown_remaining(now);
        CooldownStatus {
            is_active: remaining.is_some(),
            remaining_seconds: remaining.map_or(0, ceil_seconds),
            last_completed_at: self.last_completed_at,
            completed_count: self.completed_count,
        }
    }

    /// Applies a completion to this record.
    pub const fn apply_completion(&mut self, record: &CompletionRecord, now: DateTime<Utc>) {
        self.completed_count = record.completed_count;
        self.last_completed_at = Some(record.completed_at);
        self.cooldown_end = Some(record.cooldown_end);
        self.next_reset_at = record.next_reset_at;
        self.updated_at = now;
    }

    /// Returns whether the latest write to this record is `claimed`.
    #[must_use]
    pub fn holds_claim(&self, claimed: &CompletionRecord) -> bool {
        self.completed_count == claimed.completed_count
            && self.last_completed_at == Some(claimed.completed_at)
            && self.next_reset_at == claimed.next_reset_at
    }

    /// Rolls back a claimed completion to the counters of `previous`.
    pub const fn apply_release(&mut self, previous: &Self, now: DateTime<Utc>) {
        self.completed_count = previous.completed_count;
        self.last_completed_at = previous.last_completed_at;
        self.cooldown_end = previous.cooldown_end;
        self.updated_at = now;
    }

    /// Returns this record to the start-of-day state.
    pub const fn apply_reset(&mut self, next_reset_at: DateTime<Utc>, now: DateTime<Utc>) {
        self.completed_count = 0;
        self.last_completed_at = None;
        self.cooldown_end = None;
        self.next_reset_at = next_reset_at;
        self.updated_at = now;
    }
}

/// Rounds a positive duration up to whole seconds.
fn ceil_seconds(delta: TimeDelta) -> i64 {
    let whole = delta.num_seconds();
    let has_fraction = delta - TimeDelta::seconds(whole) > TimeDelta::zero();
    whole + i64::from(has_fraction)
}
