//! A full day of completions through the public engine API.

use super::helpers::{Backend, at, backend};
use chrono::TimeDelta;
use rewardpage::daily_task::{
    domain::{CompletionRejection, DAILY_TASK_COUNT, POINTS_PER_TASK},
    services::DailyTaskError,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn five_spaced_completions_close_the_day(backend: Backend) -> Result<(), eyre::Report> {
    let user_id = backend.register("ada", 0);

    for number in 1..=DAILY_TASK_COUNT {
        let task_id = backend.task_id(user_id, number).await;
        let receipt = backend.engine.complete_task(user_id, &task_id).await?;
        eyre::ensure!(
            receipt.completed_count == number,
            "completion {number} reported count {}",
            receipt.completed_count
        );
        backend.clock.advance(TimeDelta::minutes(5));
    }

    let status = backend.engine.cooldown_status(user_id).await?;
    eyre::ensure!(status.completed_count == DAILY_TASK_COUNT, "day not closed");
    eyre::ensure!(!status.is_active, "cooldown should have lapsed");

    let overview = backend.engine.daily_overview(user_id).await?;
    eyre::ensure!(
        overview.tasks.iter().all(|task| task.is_completed()),
        "every task should be completed"
    );

    let refused = backend
        .engine
        .complete_task(user_id, &backend.task_id(user_id, 1).await)
        .await;
    eyre::ensure!(
        matches!(
            refused,
            Err(DailyTaskError::Rejected(CompletionRejection::LimitReached { .. }))
        ),
        "expected limit refusal, got {refused:?}"
    );

    let balance = backend.accounts.points_of(user_id)?;
    eyre::ensure!(
        balance == Some(POINTS_PER_TASK * i64::from(DAILY_TASK_COUNT)),
        "unexpected balance {balance:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cooldown_lapses_exactly_five_minutes_after_completion(
    backend: Backend,
) -> Result<(), eyre::Report> {
    let user_id = backend.register("grace", 0);
    let first = backend.task_id(user_id, 1).await;
    let second = backend.task_id(user_id, 2).await;
    backend.engine.complete_task(user_id, &first).await?;

    backend.clock.set(at("2026-03-10T09:04:59Z"));
    let early = backend.engine.complete_task(user_id, &second).await;
    eyre::ensure!(
        matches!(
            early,
            Err(DailyTaskError::Rejected(CompletionRejection::CooldownActive {
                remaining_seconds: 1
            }))
        ),
        "expected one second of cooldown, got {early:?}"
    );

    backend.clock.set(at("2026-03-10T09:05:00Z"));
    let receipt = backend.engine.complete_task(user_id, &second).await?;
    eyre::ensure!(receipt.completed_count == 2, "second completion not counted");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn yesterdays_task_cannot_be_completed_after_midnight(
    backend: Backend,
) -> Result<(), eyre::Report> {
    let user_id = backend.register("linus", 0);
    let stale = backend.task_id(user_id, 3).await;

    backend.clock.set(at("2026-03-11T00:00:01Z"));
    let result = backend.engine.complete_task(user_id, &stale).await;

    eyre::ensure!(
        matches!(result, Err(DailyTaskError::TaskNotFound(_))),
        "expected TaskNotFound, got {result:?}"
    );
    let progress = backend.engine.ensure_current_day(user_id).await?;
    eyre::ensure!(progress.completed_count() == 0, "fresh day should be empty");
    eyre::ensure!(
        progress.next_reset_at() == at("2026-03-12T00:00:00Z"),
        "next reset should be the following midnight"
    );
    Ok(())
}
