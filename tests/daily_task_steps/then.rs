//! Then steps for daily task BDD scenarios.

use super::world::{DailyTaskWorld, instant, run_async};
use eyre::WrapErr;
use rewardpage::daily_task::{
    domain::{CompletionRejection, DailyTaskProgress},
    ports::DailyTaskStore,
    services::DailyTaskError,
};
use rstest_bdd_macros::then;

fn current_progress(world: &DailyTaskWorld) -> Result<DailyTaskProgress, eyre::Report> {
    let user_id = world.user()?;
    run_async(world.engine.ensure_current_day(user_id)).wrap_err("load progress")
}

#[then("{count:usize} tasks are returned")]
fn tasks_are_returned(world: &DailyTaskWorld, count: usize) -> Result<(), eyre::Report> {
    if world.returned_tasks.len() != count {
        return Err(eyre::eyre!(
            "expected {count} tasks, found {}",
            world.returned_tasks.len()
        ));
    }
    let numbers: Vec<u8> = world
        .returned_tasks
        .iter()
        .map(|task| task.number().value())
        .collect();
    if numbers != [1, 2, 3, 4, 5] {
        return Err(eyre::eyre!("expected tasks numbered 1 to 5, found {numbers:?}"));
    }
    Ok(())
}

#[then("none of the returned tasks are completed")]
fn none_completed(world: &DailyTaskWorld) -> Result<(), eyre::Report> {
    if let Some(done) = world.returned_tasks.iter().find(|task| task.is_completed()) {
        return Err(eyre::eyre!(
            "task {} is already completed",
            done.number().value()
        ));
    }
    Ok(())
}

#[then("the previous day's tasks are gone")]
fn previous_tasks_gone(world: &DailyTaskWorld) -> Result<(), eyre::Report> {
    if world.earlier_tasks.is_empty() {
        return Err(eyre::eyre!("scenario recorded no earlier tasks"));
    }
    for earlier in &world.earlier_tasks {
        let found = run_async(world.tasks.find_by_id(earlier.id()))
            .map_err(|err| eyre::eyre!("look up earlier task: {err}"))?;
        if found.is_some() {
            return Err(eyre::eyre!(
                "task {} from the previous day is still stored",
                earlier.id()
            ));
        }
    }
    Ok(())
}

#[then("the completed count is {count:u8}")]
fn completed_count_is(world: &DailyTaskWorld, count: u8) -> Result<(), eyre::Report> {
    let progress = current_progress(world)?;
    if progress.completed_count() != count {
        return Err(eyre::eyre!(
            "expected completed count {count}, found {}",
            progress.completed_count()
        ));
    }
    Ok(())
}

#[then(r#"the next reset is at "{timestamp}""#)]
fn next_reset_is(world: &DailyTaskWorld, timestamp: String) -> Result<(), eyre::Report> {
    let expected = instant(&timestamp)?;
    let progress = current_progress(world)?;
    if progress.next_reset_at() != expected {
        return Err(eyre::eyre!(
            "expected next reset {expected}, found {}",
            progress.next_reset_at()
        ));
    }
    Ok(())
}

#[then("the completion succeeds with count {count:u8}")]
fn completion_succeeds(world: &DailyTaskWorld, count: u8) -> Result<(), eyre::Report> {
    match world.last_completion.as_ref() {
        Some(Ok(receipt)) if receipt.completed_count == count => Ok(()),
        other => Err(eyre::eyre!(
            "expected a completion with count {count}, got {other:?}"
        )),
    }
}

#[then(r#"the cooldown ends at "{timestamp}""#)]
fn cooldown_ends_at(world: &DailyTaskWorld, timestamp: String) -> Result<(), eyre::Report> {
    let expected = instant(&timestamp)?;
    match world.last_completion.as_ref() {
        Some(Ok(receipt)) if receipt.cooldown_until == expected => Ok(()),
        other => Err(eyre::eyre!(
            "expected cooldown until {expected}, got {other:?}"
        )),
    }
}

#[then("the completion is refused by the cooldown with {seconds:i64} seconds remaining")]
fn refused_by_cooldown(world: &DailyTaskWorld, seconds: i64) -> Result<(), eyre::Report> {
    match world.last_completion.as_ref() {
        Some(Err(DailyTaskError::Rejected(CompletionRejection::CooldownActive {
            remaining_seconds,
        }))) if *remaining_seconds == seconds => Ok(()),
        other => Err(eyre::eyre!(
            "expected a cooldown refusal with {seconds}s remaining, got {other:?}"
        )),
    }
}

#[then("the completion is refused by the daily limit")]
fn refused_by_limit(world: &DailyTaskWorld) -> Result<(), eyre::Report> {
    match world.last_completion.as_ref() {
        Some(Err(DailyTaskError::Rejected(CompletionRejection::LimitReached { .. }))) => Ok(()),
        other => Err(eyre::eyre!("expected a daily limit refusal, got {other:?}")),
    }
}
