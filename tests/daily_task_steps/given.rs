//! Given steps for daily task BDD scenarios.

use super::world::{DailyTaskWorld, instant, run_async};
use chrono::TimeDelta;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("a user with no daily task history")]
fn user_without_history(world: &mut DailyTaskWorld) -> Result<(), eyre::Report> {
    world.register_user()?;
    Ok(())
}

#[given(r#"the time is "{timestamp}""#)]
fn time_is(world: &mut DailyTaskWorld, timestamp: String) -> Result<(), eyre::Report> {
    world.clock.set(instant(&timestamp)?);
    Ok(())
}

#[given("the user has completed task {number:u8}")]
fn user_has_completed_task(world: &mut DailyTaskWorld, number: u8) -> Result<(), eyre::Report> {
    let user_id = world.user()?;
    let task_id = world.task_id(number)?;
    run_async(world.engine.complete_task(user_id, &task_id))
        .wrap_err("complete task in scenario setup")?;
    world.earlier_tasks = run_async(world.engine.get_or_create_tasks(user_id))
        .wrap_err("snapshot tasks in scenario setup")?;
    Ok(())
}

#[given("the user has completed all five tasks six minutes apart")]
fn user_has_completed_all_tasks(world: &mut DailyTaskWorld) -> Result<(), eyre::Report> {
    let user_id = world.user()?;
    for number in 1..=5 {
        let task_id = world.task_id(number)?;
        run_async(world.engine.complete_task(user_id, &task_id))
            .wrap_err_with(|| format!("complete task {number} in scenario setup"))?;
        world.clock.advance(TimeDelta::minutes(6));
    }
    Ok(())
}
