//! Diesel row model for weekly streaks.

use super::schema::weekly_streaks;
use crate::{
    streak::domain::{PersistedStreakData, StreakId, WeekDays, WeeklyStreak},
    user::UserId,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row shape shared by reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = weekly_streaks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[expect(
    clippy::struct_excessive_bools,
    reason = "one column per weekday"
)]
pub struct StreakRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Monday flag.
    pub mon: bool,
    /// Tuesday flag.
    pub tue: bool,
    /// Wednesday flag.
    pub wed: bool,
    /// Thursday flag.
    pub thu: bool,
    /// Friday flag.
    pub fri: bool,
    /// Saturday flag.
    pub sat: bool,
    /// Sunday flag.
    pub sun: bool,
    /// Latest check-in.
    pub last_check_in: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&WeeklyStreak> for StreakRow {
    fn from(streak: &WeeklyStreak) -> Self {
        let days = streak.days();
        Self {
            id: streak.id().into_inner(),
            user_id: streak.user_id().into_inner(),
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

impl From<StreakRow> for WeeklyStreak {
    fn from(row: StreakRow) -> Self {
        Self::from_persisted(PersistedStreakData {
            id: StreakId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            days: WeekDays {
                mon: row.mon,
                tue: row.tue,
                wed: row.wed,
                thu: row.thu,
                fri: row.fri,
                sat: row.sat,
                sun: row.sun,
            },
            last_check_in: row.last_check_in,
            updated_at: row.updated_at,
        })
    }
}
