//! Weekly check-ins across days and week boundaries.

use super::helpers::{Backend, at, backend};
use rewardpage::streak::domain::{CHECK_IN_POINTS, CheckInOutcome};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn daily_check_ins_accumulate_within_a_week(backend: Backend) {
    let user_id = backend.register("ada", 0);

    backend.clock.set(at("2026-03-09T08:00:00Z"));
    backend.streaks.check_in(user_id).await.expect("monday");
    backend.clock.set(at("2026-03-10T21:30:00Z"));
    backend.streaks.check_in(user_id).await.expect("tuesday");
    backend.clock.set(at("2026-03-15T23:59:59Z"));
    let sunday = backend.streaks.check_in(user_id).await.expect("sunday");

    let days = sunday.streak.days();
    assert!(days.mon && days.tue && days.sun);
    assert!(!days.wed);
    assert_eq!(backend.streaks.count(user_id).await.expect("count"), 3);
    assert_eq!(
        backend.accounts.points_of(user_id).expect("balance"),
        Some(CHECK_IN_POINTS * 3)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_check_in_on_the_same_day_is_free(backend: Backend) {
    let user_id = backend.register("grace", 0);

    backend.streaks.check_in(user_id).await.expect("first");
    let repeat = backend.streaks.check_in(user_id).await.expect("repeat");

    assert_eq!(repeat.outcome, CheckInOutcome::AlreadyCheckedIn);
    assert_eq!(repeat.points_awarded, 0);
    assert_eq!(
        backend.accounts.points_of(user_id).expect("balance"),
        Some(CHECK_IN_POINTS)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn new_week_starts_from_an_empty_streak(backend: Backend) {
    let user_id = backend.register("linus", 0);
    backend.clock.set(at("2026-03-13T10:00:00Z"));
    backend.streaks.check_in(user_id).await.expect("friday");

    backend.clock.set(at("2026-03-16T07:00:00Z"));
    let before = backend.streaks.current(user_id).await.expect("current");
    assert_eq!(before.count(), 0);

    let monday = backend.streaks.check_in(user_id).await.expect("monday");
    assert!(monday.streak.days().mon);
    assert!(!monday.streak.days().fri);
    assert_eq!(monday.streak.count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn check_in_without_account_still_marks_the_day(backend: Backend) {
    let stranger = rewardpage::user::UserId::new();

    let outcome = backend.streaks.check_in(stranger).await.expect("check-in");

    assert_eq!(outcome.outcome, CheckInOutcome::Recorded);
    assert_eq!(outcome.points_awarded, 0);
}
