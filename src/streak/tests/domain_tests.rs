//! Weekday flag and weekly rollover tests.

use crate::{
    calendar::CalendarZone,
    streak::domain::{CheckInOutcome, WeekDays, WeeklyStreak},
    user::UserId,
};
use chrono::{DateTime, Utc, Weekday};
use rstest::rstest;

fn at(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("valid RFC 3339 timestamp")
}

#[rstest]
#[case(Weekday::Mon)]
#[case(Weekday::Thu)]
#[case(Weekday::Sun)]
fn check_marks_only_the_given_day(#[case] day: Weekday) {
    let mut days = WeekDays::default();

    days.check(day);

    assert!(days.is_checked(day));
    assert_eq!(days.count(), 1);
}

#[test]
fn check_in_marks_today_once() {
    let zone = CalendarZone::utc();
    // 2026-03-10 is a Tuesday.
    let morning = at("2026-03-10T08:00:00Z");
    let mut streak = WeeklyStreak::new(UserId::new(), morning);

    let first = streak.check_in(morning, zone);
    let repeat = streak.check_in(at("2026-03-10T21:00:00Z"), zone);

    assert_eq!(first, CheckInOutcome::Recorded);
    assert_eq!(repeat, CheckInOutcome::AlreadyCheckedIn);
    assert!(streak.days().tue);
    assert_eq!(streak.count(), 1);
    assert_eq!(streak.last_check_in(), Some(morning));
}

#[test]
fn check_in_in_a_new_week_clears_previous_flags() {
    let zone = CalendarZone::utc();
    let mut streak = WeeklyStreak::new(UserId::new(), at("2026-03-09T08:00:00Z"));
    streak.check_in(at("2026-03-09T08:00:00Z"), zone);
    streak.check_in(at("2026-03-10T08:00:00Z"), zone);
    streak.check_in(at("2026-03-15T08:00:00Z"), zone);
    assert_eq!(streak.count(), 3);

    let outcome = streak.check_in(at("2026-03-17T08:00:00Z"), zone);

    assert_eq!(outcome, CheckInOutcome::Recorded);
    assert_eq!(streak.count(), 1);
    assert!(streak.days().tue);
    assert!(!streak.days().sun);
}

#[test]
fn stale_week_reads_as_empty_without_mutating() {
    let zone = CalendarZone::utc();
    let mut streak = WeeklyStreak::new(UserId::new(), at("2026-03-09T08:00:00Z"));
    streak.check_in(at("2026-03-09T08:00:00Z"), zone);

    let same_week = streak.for_week_of(at("2026-03-12T08:00:00Z"), zone);
    let next_week = streak.for_week_of(at("2026-03-16T08:00:00Z"), zone);

    assert_eq!(same_week.count(), 1);
    assert_eq!(next_week.count(), 0);
    assert_eq!(streak.count(), 1);
}
