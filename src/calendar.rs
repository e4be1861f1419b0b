//! Calendar-day boundaries used to partition per-user daily state.
//!
//! All timestamps in the crate are stored in UTC. A [`CalendarZone`] decides
//! where a "day" starts: either the server's local timezone or a fixed UTC
//! offset. Every function here is a pure function of the supplied instant, so
//! day rollover can be exercised by injecting a fixed `now`.

use chrono::{
    DateTime, Datelike, FixedOffset, IsoWeek, Local, LocalResult, NaiveDate, NaiveTime, Offset,
    TimeDelta, TimeZone, Utc, Weekday,
};

/// Timezone whose midnight delimits calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarZone {
    /// The timezone configured for the server process.
    #[default]
    ServerLocal,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl CalendarZone {
    /// Returns a zone whose days start at UTC midnight.
    #[must_use]
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Returns the start of the calendar day containing `now`.
    #[must_use]
    pub fn today_midnight(self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.start_of(self.local_date(now))
    }

    /// Returns the start of the calendar day following the one containing
    /// `now`.
    #[must_use]
    pub fn next_midnight(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = self.local_date(now);
        today.succ_opt().map_or_else(
            || self.today_midnight(now) + TimeDelta::days(1),
            |tomorrow| self.start_of(tomorrow),
        )
    }

    /// Returns the window covering the calendar day containing `now`.
    #[must_use]
    pub fn window(self, now: DateTime<Utc>) -> DayWindow {
        DayWindow {
            start: self.today_midnight(now),
            end: self.next_midnight(now),
        }
    }

    /// Returns the window of the day whose set boundary is `boundary`.
    ///
    /// Unlike [`Self::window`], an instant exactly at midnight maps to the
    /// day that midnight ends.
    #[must_use]
    pub fn day_ending_at(self, boundary: DateTime<Utc>) -> DayWindow {
        self.window(boundary - TimeDelta::nanoseconds(1))
    }

    /// Returns the weekday of `now` in this zone.
    #[must_use]
    pub fn weekday(self, now: DateTime<Utc>) -> Weekday {
        self.local_date(now).weekday()
    }

    /// Returns the ISO week of `now` in this zone.
    #[must_use]
    pub fn iso_week(self, now: DateTime<Utc>) -> IsoWeek {
        self.local_date(now).iso_week()
    }

    fn local_date(self, now: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::ServerLocal => now.with_timezone(&Local).date_naive(),
            Self::Fixed(offset) => now.with_timezone(&offset).date_naive(),
        }
    }

    fn start_of(self, date: NaiveDate) -> DateTime<Utc> {
        match self {
            Self::ServerLocal => start_of_day(&Local, date),
            Self::Fixed(offset) => start_of_day(&offset, date),
        }
    }
}

/// Half-open description of one calendar day: `(start, end]` in terms of set
/// boundaries.
///
/// A daily task set is tagged with the midnight that ends its day, so the set
/// belonging to this window is the one whose boundary lies in
/// `(start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    /// Midnight that starts the day.
    pub start: DateTime<Utc>,
    /// Midnight that ends the day; the reset boundary of today's set.
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// Returns whether a set tagged with `reset_at` belongs to this day.
    #[must_use]
    pub fn owns_boundary(&self, reset_at: DateTime<Utc>) -> bool {
        self.start < reset_at && reset_at <= self.end
    }
}

/// Returns `true` when `boundary` lies strictly before `now`.
#[must_use]
pub fn is_past_boundary(boundary: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    boundary < now
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(start) | LocalResult::Ambiguous(start, _) => start.with_timezone(&Utc),
        // Midnight falls inside a DST gap; the day starts when the gap ends.
        LocalResult::None => tz
            .from_local_datetime(&(midnight + TimeDelta::hours(1)))
            .earliest()
            .map_or_else(
                || Utc.from_utc_datetime(&midnight),
                |start| start.with_timezone(&Utc),
            ),
    }
}
