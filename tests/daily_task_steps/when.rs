//! When steps for daily task BDD scenarios.

use super::world::{DailyTaskWorld, instant, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the user requests the daily tasks")]
fn request_daily_tasks(world: &mut DailyTaskWorld) -> Result<(), eyre::Report> {
    let user_id = world.user()?;
    let overview =
        run_async(world.engine.daily_overview(user_id)).wrap_err("request daily tasks")?;
    world.returned_tasks = overview.tasks;
    Ok(())
}

#[when("the user completes task {number:u8}")]
fn complete_task(world: &mut DailyTaskWorld, number: u8) -> Result<(), eyre::Report> {
    let user_id = world.user()?;
    let task_id = world.task_id(number)?;
    world.last_completion = Some(run_async(world.engine.complete_task(user_id, &task_id)));
    Ok(())
}

#[when(r#"the clock moves to "{timestamp}""#)]
fn clock_moves_to(world: &mut DailyTaskWorld, timestamp: String) -> Result<(), eyre::Report> {
    world.clock.set(instant(&timestamp)?);
    Ok(())
}
