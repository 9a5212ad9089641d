//! Then steps for identity transition scenarios.

use super::world::{IdentityWorld, run_async};
use corkboard::board::{
    domain::{BoardConfig, BoardState, OwnerId, TaskId, seed_board, seed_task_ids},
    ports::LocalCache,
};
use rstest_bdd_macros::then;

#[then(r#"task "{task}" is in column "{column}""#)]
fn task_in_column(
    world: &mut IdentityWorld,
    task: String,
    column: String,
) -> Result<(), eyre::Report> {
    let state = world.session()?.state();
    let holder = state
        .column_of(&TaskId::new(task.as_str()))
        .ok_or_else(|| eyre::eyre!("task {task} is not placed"))?;
    eyre::ensure!(
        holder.id().as_str() == column,
        "expected task {task} in {column}, found it in {}",
        holder.id()
    );
    Ok(())
}

#[then("the seed tasks are still on the board")]
fn seed_tasks_present(world: &mut IdentityWorld) -> Result<(), eyre::Report> {
    let state = world.session()?.state();
    for id in seed_task_ids() {
        eyre::ensure!(state.task(&id).is_some(), "seed task {id} is missing");
    }
    Ok(())
}

#[then(r#"task "{task}" is titled "{title}" and owned by "{owner}""#)]
fn task_title_and_owner(
    world: &mut IdentityWorld,
    task: String,
    title: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let state = world.session()?.state();
    let found = state
        .task(&TaskId::new(task.as_str()))
        .ok_or_else(|| eyre::eyre!("task {task} is missing"))?;
    eyre::ensure!(found.title() == title, "unexpected title {}", found.title());
    eyre::ensure!(
        found.is_owned_by(&OwnerId::new(owner.as_str())),
        "task {task} is not owned by {owner}"
    );
    Ok(())
}

#[then("only the seed tasks remain on the board")]
fn only_seed_tasks(world: &mut IdentityWorld) -> Result<(), eyre::Report> {
    let state = world.session()?.state();
    eyre::ensure!(
        *state == seed_board(),
        "expected the seed board after sign-out, found {state:?}"
    );
    Ok(())
}

#[then("the cached board matches the adopted board")]
fn cache_matches_adopted(world: &mut IdentityWorld) -> Result<(), eyre::Report> {
    let state = world.session()?.state();
    let blob = run_async(world.cache.get(&BoardConfig::default().cache_key))?
        .ok_or_else(|| eyre::eyre!("nothing cached"))?;
    let cached = BoardState::from_json(&blob)?;
    eyre::ensure!(cached == *state, "cached board differs from adopted board");
    Ok(())
}
