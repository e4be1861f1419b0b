//! Per-user weekly streak record.

use super::WeekDays;
use crate::{calendar::CalendarZone, user::UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Points credited for the first check-in of a day.
pub const CHECK_IN_POINTS: i64 = 5;

/// Unique identifier for a streak record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreakId(Uuid);

impl StreakId {
    /// Creates a new random streak identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a streak identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for StreakId {
    fn default() -> Self {
        Self::new()
    }
}

/// Effect of a check-in request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInOutcome {
    /// Today was marked and the award is due.
    Recorded,
    /// The user had already checked in today; nothing changed.
    AlreadyCheckedIn,
}

/// Weekly check-in record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyStreak {
    id: StreakId,
    user_id: UserId,
    days: WeekDays,
    last_check_in: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted streak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedStreakData {
    /// Persisted record identifier.
    pub id: StreakId,
    /// Owner of the record.
    pub user_id: UserId,
    /// Weekday flags.
    pub days: WeekDays,
    /// Latest check-in.
    pub last_check_in: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl WeeklyStreak {
    /// Creates an empty streak.
    #[must_use]
    pub fn new(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: StreakId::new(),
            user_id,
            days: WeekDays::default(),
            last_check_in: None,
            updated_at: now,
        }
    }

    /// Reconstructs a streak from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedStreakData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            days: data.days,
            last_check_in: data.last_check_in,
            updated_at: data.updated_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> StreakId {
        self.id
    }

    /// Returns the owner of the record.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the weekday flags as stored.
    #[must_use]
    pub const fn days(&self) -> WeekDays {
        self.days
    }

    /// Returns the latest check-in.
    #[must_use]
    pub const fn last_check_in(&self) -> Option<DateTime<Utc>> {
        self.last_check_in
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the number of checked days in the stored week.
    #[must_use]
    pub fn count(&self) -> u8 {
        self.days.count()
    }

    /// Returns the record as it applies to the week containing `now`.
    ///
    /// Flags from an earlier ISO week are cleared.
    #[must_use]
    pub fn for_week_of(&self, now: DateTime<Utc>, zone: CalendarZone) -> Self {
        let mut view = self.clone();
        if view.is_from_earlier_week(now, zone) {
            view.days = WeekDays::default();
        }
        view
    }

    /// Marks today's weekday.
    ///
    /// Clears the flags first when the previous check-in fell in an earlier
    /// week. A second check-in on the same day changes nothing.
    pub fn check_in(&mut self, now: DateTime<Utc>, zone: CalendarZone) -> CheckInOutcome {
        if self
            .last_check_in
            .is_some_and(|last| zone.today_midnight(last) == zone.today_midnight(now))
        {
            return CheckInOutcome::AlreadyCheckedIn;
        }
        if self.is_from_earlier_week(now, zone) {
            self.days = WeekDays::default();
        }
        self.days.check(zone.weekday(now));
        self.last_check_in = Some(now);
        self.updated_at = now;
        CheckInOutcome::Recorded
    }

    fn is_from_earlier_week(&self, now: DateTime<Utc>, zone: CalendarZone) -> bool {
        self.last_check_in
            .is_some_and(|last| zone.iso_week(last) != zone.iso_week(now))
    }
}
